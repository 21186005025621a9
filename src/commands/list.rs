//! Contains the run logic for the `!list` command: top Yelp results for
//! the stored session.

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::Result;
use crate::model::AppState;
use crate::util::send_long_message;
use crate::yelp::strip_website_lines;

pub const NO_SESSION_NOTICE: &str =
    "❌ Please run !get first to provide your business type and zip code.";

pub async fn run_prefix(ctx: &Context, msg: &Message, state: &AppState) -> Result<()> {
    let Some(session) = state.sessions.session(msg.author.id) else {
        msg.channel_id.say(&ctx.http, NO_SESSION_NOTICE).await?;
        return Ok(());
    };

    let status = msg
        .channel_id
        .say(
            &ctx.http,
            format!(
                "🔍 Searching for **{}** in zip code **{}**...",
                session.business_type, session.zipcode
            ),
        )
        .await?;

    match state
        .yelp
        .search(&session.business_type, &session.zipcode)
        .await
    {
        Ok(outcome) => {
            state
                .sessions
                .store_results(msg.channel_id, outcome.records);
            // The listing shows only the Yelp URL; drop the secondary
            // business-website lines.
            let listing = strip_website_lines(&outcome.rendered);
            status.delete(&ctx.http).await?;
            send_long_message(ctx, msg.channel_id, &listing).await?;
        }
        Err(e) => {
            status.delete(&ctx.http).await?;
            msg.channel_id.say(&ctx.http, e.to_string()).await?;
        }
    }
    Ok(())
}
