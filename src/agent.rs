//! The ambient chat responder: completion client + per-channel history.

use serenity::builder::GetMessages;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::constants::{MAX_HISTORY, SYSTEM_PROMPT};
use crate::history::ChannelHistories;
use crate::llm::{CompletionError, ConversationTurn, LlmClient};

pub struct Agent {
    pub llm: LlmClient,
    histories: ChannelHistories,
}

impl Agent {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            histories: ChannelHistories::new(),
        }
    }

    /// Respond to an ambient (non-command) message with channel context.
    ///
    /// On first contact with a channel the buffer is seeded by replaying up to
    /// [`MAX_HISTORY`] prior messages, then the incoming message is appended
    /// and the whole buffer (system turn first) is sent for completion. The
    /// reply is appended as an assistant turn so later requests see it.
    pub async fn respond(&self, ctx: &Context, msg: &Message) -> Result<String, CompletionError> {
        let channel = msg.channel_id;

        if !self.histories.is_seeded(channel).await {
            let seed = self.fetch_channel_seed(ctx, msg).await;
            self.histories.seed(channel, seed).await;
        }

        self.histories
            .append(channel, ConversationTurn::user(&msg.content))
            .await;

        let turns = self.histories.completion_turns(channel).await;
        let reply = self.llm.complete(&turns).await?;

        self.histories
            .append(channel, ConversationTurn::assistant(&reply))
            .await;

        Ok(reply)
    }

    /// One-shot answer with no conversation history (`!ask`).
    pub async fn respond_once(&self, text: &str) -> Result<String, CompletionError> {
        self.llm.complete_once(SYSTEM_PROMPT, text).await
    }

    /// Replay recent channel messages, oldest first, as conversation turns.
    /// Discord returns newest-first, so the batch is reversed. A fetch failure
    /// just means an unseeded buffer; the conversation proceeds without
    /// backfill.
    async fn fetch_channel_seed(&self, ctx: &Context, msg: &Message) -> Vec<ConversationTurn> {
        let builder = GetMessages::new().before(msg.id).limit(MAX_HISTORY as u8);
        match msg.channel_id.messages(&ctx.http, builder).await {
            Ok(mut messages) => {
                messages.reverse();
                messages
                    .into_iter()
                    .map(|m| {
                        if m.author.bot {
                            ConversationTurn::assistant(m.content)
                        } else {
                            ConversationTurn::user(m.content)
                        }
                    })
                    .collect()
            }
            Err(e) => {
                tracing::warn!(channel_id = %msg.channel_id, error = ?e, "failed to seed channel history");
                Vec::new()
            }
        }
    }
}
