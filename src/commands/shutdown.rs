//! Privileged shard shutdown (`!shutdown`).

use serenity::model::channel::Message;
use serenity::model::permissions::Permissions;
use serenity::prelude::Context;

use crate::error::Result;
use crate::ShardManagerContainer;

/// Guild owner or a member with an administrator role.
fn is_privileged(ctx: &Context, msg: &Message) -> bool {
    let Some(guild_id) = msg.guild_id else {
        return false;
    };
    let Some(guild) = ctx.cache.guild(guild_id) else {
        return false;
    };
    if msg.author.id == guild.owner_id {
        return true;
    }
    if let Some(member) = &msg.member {
        return member.roles.iter().any(|role_id| {
            guild
                .roles
                .get(role_id)
                .is_some_and(|role| role.permissions.contains(Permissions::ADMINISTRATOR))
        });
    }
    false
}

pub async fn run_prefix(ctx: &Context, msg: &Message) -> Result<()> {
    if !is_privileged(ctx, msg) {
        msg.reply(&ctx.http, "You must be an administrator to use this command.")
            .await?;
        return Ok(());
    }

    tracing::info!(user = %msg.author.name, "shutdown command received");
    msg.channel_id.say(&ctx.http, "Shutting down...").await?;

    let shard_manager = {
        let data = ctx.data.read().await;
        data.get::<ShardManagerContainer>().cloned()
    };
    if let Some(shard_manager) = shard_manager {
        shard_manager.shutdown_all().await;
    }
    Ok(())
}
