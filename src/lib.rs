// Library entry so integration tests can reference internal modules.
// Re-exports the same modules used by the binary (`main.rs`).
pub mod agent;
pub mod commands;
pub mod constants;
pub mod dialog;
pub mod error;
pub mod handler;
pub mod history;
pub mod llm;
pub mod model;
pub mod outreach;
pub mod session;
pub mod util;
pub mod yelp;

pub use model::{AppState, ShardManagerContainer};
