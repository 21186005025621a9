//! Follow-up question generation and outreach-message drafting.
//!
//! Both operations make a single completion call and substitute a
//! deterministic static fallback when the call fails or its output cannot be
//! parsed. The substitution is an explicit match on the completion result;
//! the user never sees a remote failure from this module.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::llm::LlmClient;

static NUMBERED_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\.\s*").expect("valid regex"));

pub const SIGNATURE: &str = "Best,\n[Your Name]\n[Your Contact Information]";

/// Generic questions used when the model fails or returns nothing parseable.
pub fn fallback_questions() -> Vec<String> {
    [
        "What specific services do you need?",
        "When do you need this service?",
        "Do you have any specific requirements or preferences?",
        "What is your budget range?",
        "Is there anything else the business should know?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Pull questions out of the model's free text: keep lines starting with a
/// numbered prefix ("1.", " 2. " ...), strip the prefix and surrounding
/// whitespace, drop lines that are empty afterwards.
pub fn parse_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if !NUMBERED_LINE_RE.is_match(trimmed) {
                return None;
            }
            let question = NUMBERED_LINE_RE.replace(trimmed, "").trim().to_string();
            if question.is_empty() { None } else { Some(question) }
        })
        .collect()
}

fn question_prompt(business_type: &str) -> String {
    format!(
        "Given a user is looking for a {business_type}, generate a list of 4-6 relevant questions that would help gather information to request a quote or service details.\n\
         The questions should be specific to this type of business/service and help draft a detailed message to the business.\n\
         Format each question on a new line starting with a number and a period (e.g., \"1. Question text\").\n\
         Consider what information would be most relevant for this specific type of business to provide an accurate quote or service details."
    )
}

/// Questions tailored to a business category. Always returns a non-empty
/// list: a failed call or an unparseable response falls back to the generic
/// five.
pub async fn generate_questions(llm: &LlmClient, business_type: &str) -> Vec<String> {
    match llm
        .complete_once(crate::constants::SYSTEM_PROMPT, &question_prompt(business_type))
        .await
    {
        Ok(response) => {
            let questions = parse_questions(&response);
            if questions.is_empty() {
                tracing::warn!(%business_type, "no questions parsed from completion; using fallback list");
                fallback_questions()
            } else {
                questions
            }
        }
        Err(e) => {
            tracing::error!(%business_type, error = %e, "question generation failed; using fallback list");
            fallback_questions()
        }
    }
}

fn draft_prompt(business_type: &str, answers: &[(String, String)]) -> String {
    // Hand the model the answers as pretty-printed JSON, in the order they
    // were collected.
    let map: serde_json::Map<String, serde_json::Value> = answers
        .iter()
        .map(|(q, a)| (q.clone(), serde_json::Value::String(a.clone())))
        .collect();
    let responses = serde_json::to_string_pretty(&map)
        .expect("string map always serializes");
    format!(
        "Draft a professional message to a {business_type} business requesting a quote or service information.\n\
         Use the following information to create the message:\n\n\
         Business Type: {business_type}\n\
         Customer Responses:\n{responses}\n\n\
         The message should:\n\
         1. Be professional and courteous\n\
         2. Include all relevant information from the customer's responses, but NEVER disclose the user's budget upfront.\n\
         3. Be written by a master negotiator aiming to get the best possible offer.\n\
         4. Request pricing and availability information clearly.\n\
         5. End with a strong call to action.\n\
         6. Always conclude with:\n\n{SIGNATURE}\n\n\
         Format the message as a plain text email without any markdown or special formatting."
    )
}

/// Deterministic template used when the drafting call fails.
pub fn fallback_message(business_type: &str, answers: &[(String, String)]) -> String {
    let bullets = answers
        .iter()
        .map(|(q, a)| format!("- {q}: {a}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Hi! I found your business on Yelp and I'm interested in your services.\n\n\
         I'm looking for {business_type} services and would like to request a quote. Here are my requirements:\n\n\
         {bullets}\n\n\
         Could you please provide information about your services, pricing, and availability? Thank you!\n\n\
         {SIGNATURE}"
    )
}

/// Draft an outreach message from the collected answers. `extra` pairs (such
/// as the specific business name) are appended after the answers, preserving
/// insertion order.
pub async fn draft_message(
    llm: &LlmClient,
    business_type: &str,
    answers: &[(String, String)],
    extra: &[(String, String)],
) -> String {
    let mut merged: Vec<(String, String)> = answers.to_vec();
    merged.extend(extra.iter().cloned());

    match llm
        .complete_once(
            crate::constants::SYSTEM_PROMPT,
            &draft_prompt(business_type, &merged),
        )
        .await
    {
        Ok(message) => message.trim().to_string(),
        Err(e) => {
            tracing::error!(%business_type, error = %e, "message drafting failed; using fallback template");
            fallback_message(business_type, &merged)
        }
    }
}
