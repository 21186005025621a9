//! Stateless Yelp search for the `!search <term> <zipcode>` command.

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::Result;
use crate::model::AppState;
use crate::util::send_long_message;
use crate::yelp::SearchError;

pub async fn run_prefix(
    ctx: &Context,
    msg: &Message,
    args: Vec<&str>,
    state: &AppState,
) -> Result<()> {
    // Last argument is the zipcode; everything before it is the term, so
    // multi-word terms work without quoting.
    let Some((&zipcode, term_parts)) = args.split_last() else {
        msg.channel_id
            .say(&ctx.http, "Usage: `!search <term> <zipcode>`")
            .await?;
        return Ok(());
    };
    if term_parts.is_empty() {
        msg.channel_id
            .say(&ctx.http, "Usage: `!search <term> <zipcode>`")
            .await?;
        return Ok(());
    }
    let term = term_parts.join(" ");
    let term = term.trim_matches('"');

    let status = msg
        .channel_id
        .say(
            &ctx.http,
            format!("🔍 Searching for '{term}' in {zipcode}..."),
        )
        .await?;

    match state.yelp.search(term, zipcode).await {
        Ok(outcome) => {
            state
                .sessions
                .store_results(msg.channel_id, outcome.records);
            send_long_message(ctx, msg.channel_id, &outcome.rendered).await?;
        }
        // Validation and remote failures both surface as a single error line;
        // the command is over either way.
        Err(e @ SearchError::InvalidZipcode) => {
            msg.channel_id.say(&ctx.http, e.to_string()).await?;
        }
        Err(e) => {
            tracing::error!(error = %e, "search command failed");
            msg.channel_id.say(&ctx.http, e.to_string()).await?;
        }
    }

    status.delete(&ctx.http).await?;
    Ok(())
}
