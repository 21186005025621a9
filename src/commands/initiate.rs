//! The guided end-to-end `!initiate` flow: banner, `get`, `list`, then
//! per-business drafting with Yelp links and a manual call to action.

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::Result;
use crate::model::AppState;
use crate::util::send_long_message;

use super::draft::{draft_for_business, search_session_businesses};
use super::list::NO_SESSION_NOTICE;
use super::{get, list};

const BANNER: &str = "✨✨✨ **__Welcome to Yelp Outreach Assistant!__** ✨✨✨\nLet's find the best businesses and craft personalized messages for you!\n\nHere's how it works:\n1. Provide your business type and zip code.\n2. Answer a few quick questions to help us understand your needs.\n3. We'll find the top businesses on Yelp for you.\n4. You'll receive personalized messages ready to send!\n\n⬇️";

pub async fn run_prefix(ctx: &Context, msg: &Message, state: &AppState) -> Result<()> {
    msg.channel_id.say(&ctx.http, BANNER).await?;

    get::run_prefix(ctx, msg, state).await?;
    list::run_prefix(ctx, msg, state).await?;

    // The dialog may have been aborted; drafting needs a completed session.
    let Some(session) = state.sessions.session(msg.author.id) else {
        msg.channel_id.say(&ctx.http, NO_SESSION_NOTICE).await?;
        return Ok(());
    };

    msg.channel_id
        .say(
            &ctx.http,
            "📝 Drafting personalized outreach messages and providing Yelp business links...",
        )
        .await?;

    let records = search_session_businesses(ctx, msg, state, &session).await?;
    for record in &records {
        let drafted = draft_for_business(state, &session, record).await;
        let url = record.yelp_url.as_deref().unwrap_or("N/A");
        let instructions = format!(
            "[{}] {}\n{}\n\n🔗 [Click here to open Yelp page]({})\n👉 Click 'Message the Business' on Yelp to send your message.\n",
            record.rank, record.name, drafted, url,
        );
        send_long_message(ctx, msg.channel_id, &instructions).await?;
    }
    Ok(())
}
