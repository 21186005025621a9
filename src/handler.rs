//! Serenity event handler: prefix-command dispatch and the ambient responder.
//!
//! Inbound messages flow through three gates, in order: messages from bots
//! are dropped; prefix commands are dispatched; everything else is first
//! offered to the reply router (an active `get` dialog consumes it) and only
//! then, if no dialog is running in the channel, handed to the ambient chat
//! responder. Every command error is caught here and converted to a generic
//! apology so no handler can crash the process.

use std::str::FromStr;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::{Context, EventHandler};

use crate::error::Result;
use crate::util::send_long_message;
use crate::{commands, AppState};

pub const PREFIX: &str = "!";

enum Command {
    Ping,
    Ask,
    Search,
    Get,
    List,
    Draft,
    Initiate,
    Message,
    Welcome,
    Shutdown,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ping" => Ok(Command::Ping),
            "ask" => Ok(Command::Ask),
            "search" => Ok(Command::Search),
            "get" => Ok(Command::Get),
            "list" => Ok(Command::List),
            "draft" => Ok(Command::Draft),
            "initiate" => Ok(Command::Initiate),
            "message" | "send-message" => Ok(Command::Message),
            "welcome" => Ok(Command::Welcome),
            "shutdown" => Ok(Command::Shutdown),
            _ => Ok(Command::Unknown),
        }
    }
}

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            tracing::error!("AppState missing from TypeMap");
            return;
        };

        if let Some(command_body) = msg.content.strip_prefix(PREFIX) {
            let mut args = command_body.split_whitespace();
            let Some(command_str) = args.next() else {
                return;
            };
            let command = Command::from_str(command_str).unwrap_or(Command::Unknown);
            let args_vec: Vec<&str> = args.collect();

            let outcome: Result<()> = match command {
                Command::Ping => commands::ping::run_prefix(&ctx, &msg, args_vec).await,
                Command::Ask => commands::ask::run_prefix(&ctx, &msg, args_vec, &app_state).await,
                Command::Search => {
                    commands::search::run_prefix(&ctx, &msg, args_vec, &app_state).await
                }
                Command::Get => commands::get::run_prefix(&ctx, &msg, &app_state).await,
                Command::List => commands::list::run_prefix(&ctx, &msg, &app_state).await,
                Command::Draft => commands::draft::run_prefix(&ctx, &msg, &app_state).await,
                Command::Initiate => {
                    commands::initiate::run_prefix(&ctx, &msg, &app_state).await
                }
                Command::Message => {
                    commands::message::run_prefix(&ctx, &msg, args_vec, &app_state).await
                }
                Command::Welcome => commands::welcome::run_prefix(&ctx, &msg).await,
                Command::Shutdown => commands::shutdown::run_prefix(&ctx, &msg).await,
                Command::Unknown => Ok(()),
            };

            if let Err(e) = outcome {
                tracing::error!(command = command_str, user_id = %msg.author.id, error = %e, "command failed");
                let _ = msg
                    .channel_id
                    .say(
                        &ctx.http,
                        "Sorry, I encountered an error while processing your request.",
                    )
                    .await;
            }
            return;
        }

        // Non-command message: an active dialog waiting on this author and
        // channel consumes it outright.
        if app_state
            .replies
            .offer(msg.author.id, msg.channel_id, &msg.content)
        {
            return;
        }

        // Ambient chat. Stay silent while any dialog runs in this channel so
        // the responder cannot race the dialog's own prompts.
        if app_state.sessions.dialog_active_in_channel(msg.channel_id) {
            return;
        }

        tracing::info!(user = %msg.author.name, "processing ambient message");
        match app_state.agent.respond(&ctx, &msg).await {
            Ok(response) => {
                if let Err(e) = send_long_message(&ctx, msg.channel_id, &response).await {
                    tracing::error!(error = %e, "failed to send ambient response");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "ambient completion failed");
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.name, "connected to Discord");
    }
}
