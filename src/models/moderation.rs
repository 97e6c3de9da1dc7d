use std::time::Duration;

use serenity::all::{ChannelId, ChannelType, Colour, GuildChannel, Member, Permissions, RoleId, UserId};

use super::embed::{Embed, ALERT_RED, BEAM_GREEN, HAPPY_BEAMING};

pub const DEFAULT_REASON: &str = "No reason provided";

/// Longest timeout the platform accepts, in minutes (28 days).
pub const MAX_TIMEOUT_MINUTES: i64 = 28 * 24 * 60;

pub const MAX_CLEAR_AMOUNT: i64 = 100;

pub const DEFAULT_AUDIT_ENTRIES: i64 = 10;

/// One field per entry, and an embed holds at most 25.
pub const MAX_AUDIT_ENTRIES: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModerationAction {
    Ban,
    Kick,
    Mute,
    Unmute,
    Clear,
    Lock,
    Unlock,
    AssignRole,
    Audit,
    Say,
}

impl ModerationAction {
    /// The guild permission that on its own is enough to perform the action.
    pub fn required_permission(&self) -> Permissions {
        match self {
            Self::Ban => Permissions::BAN_MEMBERS,
            Self::Kick => Permissions::KICK_MEMBERS,
            Self::Mute | Self::Unmute => Permissions::MODERATE_MEMBERS,
            Self::Clear | Self::Say => Permissions::MANAGE_MESSAGES,
            Self::Lock | Self::Unlock => Permissions::MANAGE_CHANNELS,
            Self::AssignRole => Permissions::MANAGE_ROLES,
            Self::Audit => Permissions::VIEW_AUDIT_LOG,
        }
    }

    pub fn embed_title(&self) -> &str {
        match self {
            Self::Ban => "User Banned",
            Self::Kick => "User Kicked",
            Self::Mute => "User Muted",
            Self::Unmute => "User Unmuted",
            Self::Clear => "Messages Cleared",
            Self::Lock => "CHANNEL LOCKED",
            Self::Unlock => "CHANNEL UNLOCKED",
            Self::AssignRole => "Role Assigned",
            Self::Audit => "Audit Logs",
            Self::Say => "Message Sent",
        }
    }

    pub fn embed_colour(&self) -> Colour {
        match self {
            Self::Ban | Self::Kick | Self::Mute | Self::Lock => ALERT_RED,
            _ => BEAM_GREEN,
        }
    }

    pub fn create_embed(&self) -> Embed {
        Embed::new(self.embed_title())
            .colour(self.embed_colour())
            .footer(HAPPY_BEAMING)
    }

    pub fn failure_message(&self) -> &str {
        match self {
            Self::Ban => "Failed to ban user.",
            Self::Kick => "Failed to kick user.",
            Self::Mute => "Failed to mute user.",
            Self::Unmute => "Failed to unmute user.",
            Self::Clear => "Failed to clear messages.",
            Self::Lock => "Failed to lock channel. Check permissions.",
            Self::Unlock => "Failed to unlock channel. Check permissions.",
            Self::AssignRole => "Failed to assign role. Check role hierarchy.",
            Self::Audit => "Failed to fetch audit logs. Check permissions.",
            Self::Say => "Failed to send message. Check permissions.",
        }
    }
}

/// The member invoking a command, as far as authorization cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role_names: Vec<String>,
    pub permissions: Permissions,
}

impl Actor {
    pub fn has_role(&self, name: &str) -> bool {
        self.role_names.iter().any(|x| x == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub id: UserId,
    pub timed_out: bool,
}

impl Target {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id.get())
    }
}

impl From<&Member> for Target {
    fn from(value: &Member) -> Self {
        let now = chrono::Utc::now().timestamp();
        Target {
            id: value.user.id,
            timed_out: value
                .communication_disabled_until
                .is_some_and(|x| x.unix_timestamp() > now),
        }
    }
}

/// The channel a lock or unlock applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelTarget {
    pub id: ChannelId,
    pub text: bool,
}

impl ChannelTarget {
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id.get())
    }
}

impl From<&GuildChannel> for ChannelTarget {
    fn from(value: &GuildChannel) -> Self {
        ChannelTarget {
            id: value.id,
            text: value.kind == ChannelType::Text,
        }
    }
}

/// A moderation command with its arguments, before authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationOrder {
    Ban {
        target: Target,
        reason: Option<String>,
    },
    Kick {
        target: Target,
        reason: Option<String>,
    },
    Mute {
        target: Target,
        minutes: i64,
        reason: Option<String>,
    },
    Unmute {
        target: Target,
    },
    Clear {
        amount: i64,
    },
    Lock {
        channel: ChannelTarget,
    },
    Unlock {
        channel: ChannelTarget,
    },
    AssignRole {
        target: Target,
        role: RoleId,
        already_assigned: bool,
    },
    Audit {
        limit: i64,
    },
    Say {
        channel: ChannelId,
        message: String,
    },
}

impl ModerationOrder {
    pub fn action(&self) -> ModerationAction {
        match self {
            Self::Ban { .. } => ModerationAction::Ban,
            Self::Kick { .. } => ModerationAction::Kick,
            Self::Mute { .. } => ModerationAction::Mute,
            Self::Unmute { .. } => ModerationAction::Unmute,
            Self::Clear { .. } => ModerationAction::Clear,
            Self::Lock { .. } => ModerationAction::Lock,
            Self::Unlock { .. } => ModerationAction::Unlock,
            Self::AssignRole { .. } => ModerationAction::AssignRole,
            Self::Audit { .. } => ModerationAction::Audit,
            Self::Say { .. } => ModerationAction::Say,
        }
    }
}

/// The privileged call actually performed against the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sanction {
    Ban { user: UserId, reason: String },
    Kick { user: UserId, reason: String },
    Timeout {
        user: UserId,
        duration: Duration,
        reason: String,
    },
    RemoveTimeout { user: UserId },
    Purge { count: u8 },
    /// Deny or restore sending for `@everyone`, then post `announcement` there.
    SetChannelLock {
        channel: ChannelId,
        locked: bool,
        announcement: Embed,
    },
    AddRole { user: UserId, role: RoleId },
    /// Post `message` with every mention disabled.
    Say { channel: ChannelId, message: String },
}

/// One audit log entry, already rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub action: String,
    pub executor: UserId,
    pub target: Option<String>,
    pub reason: Option<String>,
    pub created_at: i64,
}
