//! Crate-level error type for command handlers.
//!
//! Adapter-specific failures (`CompletionError`, `SearchError`) live next to
//! their clients; this wrapper is what command modules bubble up to the
//! dispatch boundary in `handler.rs`, where it is logged and turned into a
//! generic apology line.

use thiserror::Error;

use crate::llm::CompletionError;
use crate::yelp::SearchError;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("discord api error: {0}")]
    Discord(#[from] serenity::Error),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
