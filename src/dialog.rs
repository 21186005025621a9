//! The interactive `get` collection flow.
//!
//! The turn-by-turn logic is a pure `(state, event) -> (state, effects)`
//! machine so the whole flow can be exercised without Discord or either
//! remote API. The async driver below owns the side effects: prompting,
//! bounded waits on the reply router, question generation, and storing the
//! finished session.

use std::time::Duration;

use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::constants::{ANSWER_TIMEOUT_SECS, PROMPT_TIMEOUT_SECS};
use crate::error::Result;
use crate::model::AppState;
use crate::outreach;
use crate::session::UserSession;
use crate::yelp::is_valid_zipcode;

pub const BUSINESS_TYPE_PROMPT: &str = "\n🔍 What type of business or service are you looking for? (e.g., pizza, dentist, plumber, movers, tax services, etc.)";
pub const ZIPCODE_PROMPT: &str = "📍 Please enter your 5-digit zip code:";
pub const GENERATING_NOTICE: &str = "🔄 Generating relevant questions based on your request...\n📝 I'll ask you a few questions to gather more context.";
pub const SUCCESS_NOTICE: &str =
    "✅ Information collected successfully! You can now use !list to see Yelp results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    InvalidBusinessType,
    InvalidZipcode,
    Timeout,
}

impl AbortReason {
    pub fn user_message(self) -> &'static str {
        match self {
            Self::InvalidBusinessType => {
                "❌ Please provide a valid business type (at least 2 characters)."
            }
            Self::InvalidZipcode => "❌ Please provide a valid 5-digit zip code.",
            Self::Timeout => "❌ You took too long to respond. Please try again with !get",
        }
    }
}

#[derive(Debug, Clone)]
pub enum DialogState {
    AwaitingBusinessType,
    AwaitingZip {
        business_type: String,
    },
    GeneratingQuestions {
        business_type: String,
        zipcode: String,
    },
    AwaitingAnswer {
        business_type: String,
        zipcode: String,
        questions: Vec<String>,
        answers: Vec<(String, String)>,
        index: usize,
    },
    Complete(UserSession),
    Aborted(AbortReason),
}

impl DialogState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Aborted(_))
    }
}

#[derive(Debug, Clone)]
pub enum DialogEvent {
    /// The next message from the same author in the same channel.
    Reply(String),
    /// The bounded wait expired.
    TimedOut,
    /// The question generator finished (always non-empty: it falls back).
    QuestionsReady(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send this text to the channel.
    Prompt(String),
    /// Store the collected session for the user.
    Finished(UserSessionFields),
    /// Send the abort message; the flow is over.
    Abort(&'static str),
}

/// Plain-data twin of [`UserSession`] so effects stay comparable in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSessionFields {
    pub business_type: String,
    pub zipcode: String,
    pub answers: Vec<(String, String)>,
}

impl From<UserSessionFields> for UserSession {
    fn from(fields: UserSessionFields) -> Self {
        Self {
            business_type: fields.business_type,
            zipcode: fields.zipcode,
            answers: fields.answers,
        }
    }
}

fn question_prompt_line(index: usize, total: usize, question: &str) -> String {
    format!("🔹 Question {}/{}: {}", index + 1, total, question)
}

fn abort(reason: AbortReason) -> (DialogState, Vec<Effect>) {
    (
        DialogState::Aborted(reason),
        vec![Effect::Abort(reason.user_message())],
    )
}

/// One transition of the collection dialog.
pub fn advance(state: DialogState, event: DialogEvent) -> (DialogState, Vec<Effect>) {
    match (state, event) {
        (DialogState::AwaitingBusinessType, DialogEvent::Reply(text)) => {
            let business_type = text.trim().to_string();
            if business_type.chars().count() < 2 {
                return abort(AbortReason::InvalidBusinessType);
            }
            (
                DialogState::AwaitingZip { business_type },
                vec![Effect::Prompt(ZIPCODE_PROMPT.to_string())],
            )
        }

        (DialogState::AwaitingZip { business_type }, DialogEvent::Reply(text)) => {
            let zipcode = text.trim().to_string();
            if !is_valid_zipcode(&zipcode) {
                return abort(AbortReason::InvalidZipcode);
            }
            (
                DialogState::GeneratingQuestions { business_type, zipcode },
                vec![Effect::Prompt(GENERATING_NOTICE.to_string())],
            )
        }

        (
            DialogState::GeneratingQuestions { business_type, zipcode },
            DialogEvent::QuestionsReady(questions),
        ) => {
            // The generator falls back rather than returning nothing, but the
            // machine does not rely on that.
            let questions = if questions.is_empty() {
                outreach::fallback_questions()
            } else {
                questions
            };
            let first = question_prompt_line(0, questions.len(), &questions[0]);
            (
                DialogState::AwaitingAnswer {
                    business_type,
                    zipcode,
                    questions,
                    answers: Vec::new(),
                    index: 0,
                },
                vec![Effect::Prompt(first)],
            )
        }

        (
            DialogState::AwaitingAnswer {
                business_type,
                zipcode,
                questions,
                mut answers,
                index,
            },
            DialogEvent::Reply(text),
        ) => {
            answers.push((questions[index].clone(), text.trim().to_string()));
            let next = index + 1;
            if next == questions.len() {
                let fields = UserSessionFields { business_type, zipcode, answers };
                return (
                    DialogState::Complete(fields.clone().into()),
                    vec![
                        Effect::Prompt(SUCCESS_NOTICE.to_string()),
                        Effect::Finished(fields),
                    ],
                );
            }
            let prompt = question_prompt_line(next, questions.len(), &questions[next]);
            (
                DialogState::AwaitingAnswer {
                    business_type,
                    zipcode,
                    questions,
                    answers,
                    index: next,
                },
                vec![Effect::Prompt(prompt)],
            )
        }

        (
            DialogState::AwaitingBusinessType
            | DialogState::AwaitingZip { .. }
            | DialogState::AwaitingAnswer { .. },
            DialogEvent::TimedOut,
        ) => abort(AbortReason::Timeout),

        // Terminal states and mismatched events do not move.
        (state, _) => (state, Vec::new()),
    }
}

/// Drive the machine against Discord. Holds the per-(user, channel) dialog
/// guard for its whole extent; the guard's Drop releases the slot on every
/// exit path. Returns the stored session when the flow completed.
pub async fn run_dialog(
    ctx: &Context,
    msg: &Message,
    state: &AppState,
) -> Result<Option<UserSession>> {
    let Some(_guard) = state.sessions.begin_dialog(msg.author.id, msg.channel_id) else {
        msg.channel_id
            .say(&ctx.http, "⚠️ You already have a session in progress in this channel.")
            .await?;
        return Ok(None);
    };

    let prompt_timeout = Duration::from_secs(PROMPT_TIMEOUT_SECS);
    let answer_timeout = Duration::from_secs(ANSWER_TIMEOUT_SECS);

    let mut dialog = DialogState::AwaitingBusinessType;
    msg.channel_id.say(&ctx.http, BUSINESS_TYPE_PROMPT).await?;

    let mut completed = None;
    while !dialog.is_terminal() {
        let event = match &dialog {
            DialogState::AwaitingBusinessType | DialogState::AwaitingZip { .. } => {
                wait_event(ctx_wait(state, msg, prompt_timeout).await)
            }
            DialogState::AwaitingAnswer { .. } => {
                wait_event(ctx_wait(state, msg, answer_timeout).await)
            }
            DialogState::GeneratingQuestions { business_type, .. } => {
                let questions =
                    outreach::generate_questions(&state.agent.llm, business_type).await;
                DialogEvent::QuestionsReady(questions)
            }
            DialogState::Complete(_) | DialogState::Aborted(_) => break,
        };

        let (next, effects) = advance(dialog, event);
        dialog = next;

        for effect in effects {
            match effect {
                Effect::Prompt(text) => {
                    msg.channel_id.say(&ctx.http, text).await?;
                }
                Effect::Abort(text) => {
                    msg.channel_id.say(&ctx.http, text).await?;
                }
                Effect::Finished(fields) => {
                    let session: UserSession = fields.into();
                    state.sessions.store_session(msg.author.id, session.clone());
                    completed = Some(session);
                }
            }
        }
    }

    Ok(completed)
}

async fn ctx_wait(
    state: &AppState,
    msg: &Message,
    timeout: Duration,
) -> std::result::Result<String, tokio::time::error::Elapsed> {
    state
        .replies
        .wait_for_reply(msg.author.id, msg.channel_id, timeout)
        .await
}

fn wait_event(result: std::result::Result<String, tokio::time::error::Elapsed>) -> DialogEvent {
    match result {
        Ok(content) => DialogEvent::Reply(content),
        Err(_) => DialogEvent::TimedOut,
    }
}
