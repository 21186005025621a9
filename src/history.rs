//! Per-channel bounded conversation history.
//!
//! Each channel gets an ordered buffer of user/assistant turns, capped at
//! [`MAX_HISTORY`]; the oldest turns are evicted first. The system prompt is
//! not stored in the buffer; `completion_turns` prepends it so every request
//! starts with the system turn regardless of eviction. Lives for the process
//! lifetime, no persistence.

use std::collections::HashMap;

use serenity::model::id::ChannelId;
use tokio::sync::RwLock;

use crate::constants::{MAX_HISTORY, SYSTEM_PROMPT};
use crate::llm::ConversationTurn;

#[derive(Default)]
pub struct ChannelHistories {
    inner: RwLock<HashMap<ChannelId, Vec<ConversationTurn>>>,
}

impl ChannelHistories {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_seeded(&self, channel: ChannelId) -> bool {
        self.inner
            .read()
            .await
            .get(&channel)
            .is_some_and(|turns| !turns.is_empty())
    }

    /// Install replayed platform history for a channel, oldest first. Only
    /// applies when the channel's buffer is still empty; later calls are
    /// no-ops so a seed never clobbers live turns.
    pub async fn seed(&self, channel: ChannelId, turns: Vec<ConversationTurn>) {
        let mut map = self.inner.write().await;
        let buffer = map.entry(channel).or_default();
        if buffer.is_empty() {
            *buffer = turns;
            Self::trim(buffer);
        }
    }

    /// Append the latest turn, evicting from the front past the cap.
    pub async fn append(&self, channel: ChannelId, turn: ConversationTurn) {
        let mut map = self.inner.write().await;
        let buffer = map.entry(channel).or_default();
        buffer.push(turn);
        Self::trim(buffer);
    }

    /// The buffer mapped into a completion request: system turn first, then
    /// the stored turns in order.
    pub async fn completion_turns(&self, channel: ChannelId) -> Vec<ConversationTurn> {
        let map = self.inner.read().await;
        let stored = map.get(&channel).map(Vec::as_slice).unwrap_or_default();
        let mut turns = Vec::with_capacity(stored.len() + 1);
        turns.push(ConversationTurn::system(SYSTEM_PROMPT));
        turns.extend_from_slice(stored);
        turns
    }

    pub async fn len(&self, channel: ChannelId) -> usize {
        self.inner
            .read()
            .await
            .get(&channel)
            .map_or(0, Vec::len)
    }

    fn trim(buffer: &mut Vec<ConversationTurn>) {
        if buffer.len() > MAX_HISTORY {
            let excess = buffer.len() - MAX_HISTORY;
            buffer.drain(..excess);
        }
    }
}
