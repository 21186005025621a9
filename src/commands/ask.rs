//! One-shot agent answer without conversation history (`!ask`).

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::Result;
use crate::model::AppState;
use crate::util::send_long_message;

pub async fn run_prefix(
    ctx: &Context,
    msg: &Message,
    args: Vec<&str>,
    state: &AppState,
) -> Result<()> {
    if args.is_empty() {
        msg.channel_id
            .say(
                &ctx.http,
                "Please provide a question to ask the agent. Usage: !ask What is the capital of France?",
            )
            .await?;
        return Ok(());
    }

    let question = args.join(" ");
    let response = state.agent.respond_once(&question).await?;
    send_long_message(ctx, msg.channel_id, &response).await
}
