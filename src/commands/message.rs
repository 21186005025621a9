//! Copy-paste instructions for messaging a business through Yelp
//! (`!message <rank> [text]`). Reads the channel's cached search results; nothing
//! is ever sent on the user's behalf.

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::error::Result;
use crate::model::AppState;
use crate::util::send_long_message;
use crate::yelp::BusinessRecord;

const DEFAULT_BODY: &str = "Hi! I found your business on Yelp and I'm interested in getting more information about your services. Could you please provide details about pricing and availability? Thank you!";

pub async fn run_prefix(
    ctx: &Context,
    msg: &Message,
    args: Vec<&str>,
    state: &AppState,
) -> Result<()> {
    let Some(rank) = args.first().and_then(|s| s.parse::<usize>().ok()) else {
        msg.channel_id
            .say(&ctx.http, "Usage: `!message <business number> [message]`")
            .await?;
        return Ok(());
    };

    let Some(records) = state.sessions.results(msg.channel_id) else {
        msg.channel_id
            .say(
                &ctx.http,
                "❌ Please run a !search command first to get business results.",
            )
            .await?;
        return Ok(());
    };

    let Some(record) = records.iter().find(|r| r.rank == rank) else {
        msg.channel_id
            .say(
                &ctx.http,
                format!("❌ Could not find Yelp page for business number {rank}."),
            )
            .await?;
        return Ok(());
    };

    let Some(message_url) = record.message_url() else {
        msg.channel_id
            .say(
                &ctx.http,
                format!("❌ Could not find Yelp page for business number {rank}."),
            )
            .await?;
        return Ok(());
    };

    let body = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        DEFAULT_BODY.to_string()
    };

    let instructions = build_instructions(record, &message_url, &body);
    send_long_message(ctx, msg.channel_id, &instructions).await
}

fn build_instructions(record: &BusinessRecord, message_url: &str, body: &str) -> String {
    let mut lines = vec![
        format!("📨 To message {} through Yelp:", record.name),
        String::new(),
        "1. Click this link to open Yelp's messaging page:".to_string(),
        message_url.to_string(),
        String::new(),
        "2. Copy and paste this message (or write your own):".to_string(),
        "```".to_string(),
        body.to_string(),
        "```".to_string(),
        String::new(),
        "Note: You'll need to be logged into your Yelp account to send the message.".to_string(),
    ];
    // Yelp's messaging hints, when the detail lookup carried them.
    if let Some(detail) = &record.detail {
        let hints: Vec<&str> = detail
            .messaging_use_case
            .as_deref()
            .into_iter()
            .chain(detail.messaging_response_rate.as_deref())
            .collect();
        if !hints.is_empty() {
            lines.push(format!("💬 {}", hints.join(" • ")));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yelp::BusinessDetail;

    fn record(url: &str) -> BusinessRecord {
        BusinessRecord {
            rank: 1,
            name: "Golden Gate Movers".to_string(),
            phone: None,
            address: vec![],
            rating: 4.5,
            review_count: 10,
            yelp_url: Some(url.to_string()),
            detail: None,
        }
    }

    #[test]
    fn message_url_derived_from_listing_url() {
        let r = record("https://www.yelp.com/biz/golden-gate-movers-sf?adjust_creative=x");
        assert_eq!(
            r.message_url().as_deref(),
            Some("https://www.yelp.com/message_the_business/golden-gate-movers-sf")
        );
    }

    #[test]
    fn missing_listing_url_yields_no_link() {
        let mut r = record("https://www.yelp.com/biz/a");
        r.yelp_url = None;
        assert!(r.message_url().is_none());
    }

    #[test]
    fn instructions_contain_link_and_body() {
        let r = record("https://www.yelp.com/biz/golden-gate-movers-sf");
        let url = r.message_url().unwrap();
        let out = build_instructions(&r, &url, "custom body");
        assert!(out.contains(&url));
        assert!(out.contains("custom body"));
        assert!(out.contains("Golden Gate Movers"));
        // No detail, no hint line.
        assert!(!out.contains("💬"));
    }

    #[test]
    fn messaging_hints_are_appended_when_known() {
        let mut r = record("https://www.yelp.com/biz/golden-gate-movers-sf");
        r.detail = Some(BusinessDetail {
            website: None,
            price: None,
            hours: None,
            categories: vec![],
            transactions: vec![],
            messaging_use_case: Some("Request a Quote".to_string()),
            messaging_response_rate: Some("Usually responds in about 1 hour".to_string()),
        });
        let url = r.message_url().unwrap();
        let out = build_instructions(&r, &url, "body");
        assert!(out.contains("💬 Request a Quote • Usually responds in about 1 hour"));
    }
}
