use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::Result;

pub async fn run_prefix(ctx: &Context, msg: &Message, args: Vec<&str>) -> Result<()> {
    let response = if args.is_empty() {
        "Pong!".to_string()
    } else {
        format!("Pong! Your argument was {}", args.join(" "))
    };
    msg.channel_id.say(&ctx.http, response).await?;
    Ok(())
}
