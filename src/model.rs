//! Shared application state, stored in Serenity's global TypeMap.

use std::sync::Arc;

use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;

use crate::agent::Agent;
use crate::session::{ReplyRouter, SessionStore};
use crate::yelp::YelpClient;

/// A container for the ShardManager, allowing it to be stored in the global
/// context (used by `!shutdown`).
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// The central, shared state of the application. An `Arc<AppState>` is stored
/// in the global context for access from any command or event handler.
pub struct AppState {
    /// Completion client plus per-channel conversation history.
    pub agent: Agent,
    /// Yelp Fusion client.
    pub yelp: YelpClient,
    /// Per-user sessions, per-channel cached results, active-dialog guards.
    pub sessions: SessionStore,
    /// Bounded wait-for-reply registry used by the `get` dialog.
    pub replies: ReplyRouter,
}

impl AppState {
    pub fn new(agent: Agent, yelp: YelpClient) -> Self {
        Self {
            agent,
            yelp,
            sessions: SessionStore::new(),
            replies: ReplyRouter::new(),
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
