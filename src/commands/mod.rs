pub mod ask;
pub mod draft;
pub mod get;
pub mod initiate;
pub mod list;
pub mod message;
pub mod ping;
pub mod search;
pub mod shutdown;
pub mod welcome;
