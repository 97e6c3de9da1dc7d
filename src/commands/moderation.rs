//! Moderation commands carry no `default_member_permissions`: members with the
//! Moderator role must see them even without the matching guild permission,
//! so access is checked by the guard instead.

use serenity::all::{GuildChannel, Member, Role};

use crate::{
    features::moderation::reject_unresolved,
    models::{
        invocation::Command,
        moderation::{ChannelTarget, ModerationOrder, Target, DEFAULT_AUDIT_ENTRIES},
    },
    responder::{PoiseResponder, Session},
    Context, Error,
};

use super::{invoking_actor, run};

async fn moderate(cx: Context<'_>, order: ModerationOrder) -> Result<(), Error> {
    let actor = match invoking_actor(cx).await {
        Ok(x) => x,
        Err(err) => {
            let responder = PoiseResponder::new(cx);
            return reject_unresolved(&mut Session::new(&responder), err).await;
        }
    };
    run(cx, Command::Moderate { actor, order }).await
}

/// The given channel, or the one the command was used in.
async fn channel_target(cx: Context<'_>, channel: Option<GuildChannel>) -> ChannelTarget {
    let channel = match channel {
        Some(x) => Some(x),
        None => cx.guild_channel().await,
    };
    channel
        .as_ref()
        .map(ChannelTarget::from)
        .unwrap_or(ChannelTarget {
            id: cx.channel_id(),
            text: false,
        })
}

/// Ban a user
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn ban(
    cx: Context<'_>,
    #[description = "The user to ban"] user: Member,
    #[description = "Reason for ban"] reason: Option<String>,
) -> Result<(), Error> {
    moderate(
        cx,
        ModerationOrder::Ban {
            target: Target::from(&user),
            reason,
        },
    )
    .await
}

/// Kick a user
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn kick(
    cx: Context<'_>,
    #[description = "The user to kick"] user: Member,
    #[description = "Reason for kick"] reason: Option<String>,
) -> Result<(), Error> {
    moderate(
        cx,
        ModerationOrder::Kick {
            target: Target::from(&user),
            reason,
        },
    )
    .await
}

/// Mute a user
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn mute(
    cx: Context<'_>,
    #[description = "The user to mute"] user: Member,
    #[description = "Duration in minutes"]
    #[min = 1]
    #[max = 40320]
    duration_minutes: i64,
    #[description = "Reason for mute"] reason: Option<String>,
) -> Result<(), Error> {
    moderate(
        cx,
        ModerationOrder::Mute {
            target: Target::from(&user),
            minutes: duration_minutes,
            reason,
        },
    )
    .await
}

/// Unmute a user
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn unmute(
    cx: Context<'_>,
    #[description = "The user to unmute"] user: Member,
) -> Result<(), Error> {
    moderate(
        cx,
        ModerationOrder::Unmute {
            target: Target::from(&user),
        },
    )
    .await
}

/// Clear messages
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn clear(
    cx: Context<'_>,
    #[description = "Number of messages to delete (1-100)"]
    #[min = 1]
    #[max = 100]
    amount: i64,
) -> Result<(), Error> {
    moderate(cx, ModerationOrder::Clear { amount }).await
}

/// Lock a channel
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn lock(
    cx: Context<'_>,
    #[description = "Channel to lock (defaults to current)"]
    #[channel_types("Text")]
    channel: Option<GuildChannel>,
) -> Result<(), Error> {
    let channel = channel_target(cx, channel).await;
    moderate(cx, ModerationOrder::Lock { channel }).await
}

/// Unlock a channel
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn unlock(
    cx: Context<'_>,
    #[description = "Channel to unlock (defaults to current)"]
    #[channel_types("Text")]
    channel: Option<GuildChannel>,
) -> Result<(), Error> {
    let channel = channel_target(cx, channel).await;
    moderate(cx, ModerationOrder::Unlock { channel }).await
}

/// Assign a role
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn role(
    cx: Context<'_>,
    #[description = "The user to assign the role to"] user: Member,
    #[description = "The role to assign"] role: Role,
) -> Result<(), Error> {
    moderate(
        cx,
        ModerationOrder::AssignRole {
            target: Target::from(&user),
            role: role.id,
            already_assigned: user.roles.contains(&role.id),
        },
    )
    .await
}

/// View audit logs
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn audit(
    cx: Context<'_>,
    #[description = "Number of entries to show (default 10)"]
    #[min = 1]
    #[max = 25]
    limit: Option<i64>,
) -> Result<(), Error> {
    moderate(
        cx,
        ModerationOrder::Audit {
            limit: limit.unwrap_or(DEFAULT_AUDIT_ENTRIES),
        },
    )
    .await
}

/// Bot says message
#[poise::command(slash_command, guild_only, category = "Moderation")]
pub async fn say(
    cx: Context<'_>,
    #[description = "Message to send"] message: String,
) -> Result<(), Error> {
    moderate(
        cx,
        ModerationOrder::Say {
            channel: cx.channel_id(),
            message,
        },
    )
    .await
}
