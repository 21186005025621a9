//! Entry point for the interactive `!get` collection dialog.

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::dialog;
use crate::error::Result;
use crate::model::AppState;

pub async fn run_prefix(ctx: &Context, msg: &Message, state: &AppState) -> Result<()> {
    dialog::run_dialog(ctx, msg, state).await?;
    Ok(())
}
