//! Misc small utilities shared across modules.

use serenity::model::id::ChannelId;
use serenity::prelude::Context;

use crate::constants::CHUNK_SIZE;
use crate::error::Result;

/// Split text into ordered pieces of at most `size` characters. The split is
/// a plain character-count boundary (no word awareness); concatenating the
/// pieces reproduces the input exactly. Empty input yields no chunks.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    assert!(size > 0, "chunk size must be positive");
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Send long content as a sequence of chunked messages.
pub async fn send_long_message(ctx: &Context, channel: ChannelId, content: &str) -> Result<()> {
    for chunk in chunk_text(content, CHUNK_SIZE) {
        channel.say(&ctx.http, chunk).await?;
    }
    Ok(())
}
