//! Contains the run logic for the `!draft` command: one personalized
//! outreach message per business.

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::Result;
use crate::model::AppState;
use crate::outreach;
use crate::session::UserSession;
use crate::util::send_long_message;
use crate::yelp::BusinessRecord;

use super::list::NO_SESSION_NOTICE;

pub async fn run_prefix(ctx: &Context, msg: &Message, state: &AppState) -> Result<()> {
    let Some(session) = state.sessions.session(msg.author.id) else {
        msg.channel_id.say(&ctx.http, NO_SESSION_NOTICE).await?;
        return Ok(());
    };

    msg.channel_id
        .say(
            &ctx.http,
            "📝 Drafting personalized outreach messages for each business...",
        )
        .await?;

    let records = search_session_businesses(ctx, msg, state, &session).await?;
    for record in &records {
        let drafted = draft_for_business(state, &session, record).await;
        let formatted = format!(
            "📝 **Outreach for {}**\n\n⬇️\n\n{}\n\n🔗 [Click here to open Yelp page]({})",
            record.name,
            drafted,
            record.yelp_url.as_deref().unwrap_or("N/A"),
        );
        send_long_message(ctx, msg.channel_id, &formatted).await?;
    }
    Ok(())
}

/// Search with the session's type/zip and cache the records for `!message`.
/// A search failure is reported inline and yields no businesses.
pub async fn search_session_businesses(
    ctx: &Context,
    msg: &Message,
    state: &AppState,
    session: &UserSession,
) -> Result<Vec<BusinessRecord>> {
    match state
        .yelp
        .search(&session.business_type, &session.zipcode)
        .await
    {
        Ok(outcome) => {
            state
                .sessions
                .store_results(msg.channel_id, outcome.records.clone());
            Ok(outcome.records)
        }
        Err(e) => {
            msg.channel_id.say(&ctx.http, e.to_string()).await?;
            Ok(Vec::new())
        }
    }
}

/// Draft with the business's own name merged into the collected answers.
pub async fn draft_for_business(
    state: &AppState,
    session: &UserSession,
    record: &BusinessRecord,
) -> String {
    let extra = [("Business Name".to_string(), record.name.clone())];
    outreach::draft_message(
        &state.agent.llm,
        &session.business_type,
        &session.answers,
        &extra,
    )
    .await
}
