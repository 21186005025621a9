// Central constants for limits, timeouts, and prompts.

/// Maximum number of user/assistant turns kept per channel history.
pub const MAX_HISTORY: usize = 30;

/// Discord caps messages at 2000 characters; leave room for formatting.
pub const CHUNK_SIZE: usize = 1900;

/// Businesses requested per Yelp search.
pub const YELP_SEARCH_LIMIT: u32 = 10;

/// Seconds the `get` dialog waits for the business type and zip code replies.
pub const PROMPT_TIMEOUT_SECS: u64 = 30;

/// Seconds the `get` dialog waits for each follow-up answer.
pub const ANSWER_TIMEOUT_SECS: u64 = 60;

pub const MISTRAL_MODEL: &str = "mistral-large-latest";
pub const MISTRAL_API_BASE: &str = "https://api.mistral.ai/v1";

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that helps users find local businesses on Yelp and automate email outreach to get the best offer for a specific task or service.";
