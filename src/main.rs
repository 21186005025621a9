use std::env;
use std::sync::Arc;

use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing_subscriber::EnvFilter;

use outreach_bot::agent::Agent;
use outreach_bot::handler::Handler;
use outreach_bot::llm::LlmClient;
use outreach_bot::model::{AppState, ShardManagerContainer};
use outreach_bot::yelp::YelpClient;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let token = env::var("DISCORD_TOKEN").expect("Expected DISCORD_TOKEN in the environment.");
    let mistral_key =
        env::var("MISTRAL_API_KEY").expect("Expected MISTRAL_API_KEY in the environment.");

    // The Yelp credential is the one hard startup requirement of the search
    // adapter; refuse to start without it.
    let yelp = match YelpClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "cannot start without Yelp credentials");
            std::process::exit(1);
        }
    };

    let llm = match env::var("MISTRAL_API_BASE") {
        Ok(base) => LlmClient::with_base(mistral_key, base),
        Err(_) => LlmClient::new(mistral_key),
    };

    let app_state = Arc::new(AppState::new(Agent::new(llm), yelp));

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler)
        .await
        .expect("Error creating the Discord client.");

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        data.insert::<AppState>(app_state);
    }

    tracing::info!("starting bot");
    if let Err(why) = client.start().await {
        tracing::error!(error = ?why, "client error");
    }
}
