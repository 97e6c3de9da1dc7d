use serenity::all::UserId;

use super::{
    content::TutorialOption,
    moderation::{Actor, ModerationOrder},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tutorials(TutorialOption),
    Method,
    Help,
    Ping,
    Uptime,
    Invite,
    Usage(Option<String>),
    ServerInfo,
    ServerIcon,
    Dice(Option<i64>),
    Coin,
    Moderate {
        actor: Actor,
        order: ModerationOrder,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tutorials(_) => "tutorials",
            Self::Method => "method",
            Self::Help => "help",
            Self::Ping => "ping",
            Self::Uptime => "uptime",
            Self::Invite => "invite",
            Self::Usage(_) => "usage",
            Self::ServerInfo => "getserver info",
            Self::ServerIcon => "getserver icon",
            Self::Dice(_) => "dice",
            Self::Coin => "coin",
            Self::Moderate { order, .. } => match order {
                ModerationOrder::Ban { .. } => "ban",
                ModerationOrder::Kick { .. } => "kick",
                ModerationOrder::Mute { .. } => "mute",
                ModerationOrder::Unmute { .. } => "unmute",
                ModerationOrder::Clear { .. } => "clear",
                ModerationOrder::Lock { .. } => "lock",
                ModerationOrder::Unlock { .. } => "unlock",
                ModerationOrder::AssignRole { .. } => "role",
                ModerationOrder::Audit { .. } => "audit",
                ModerationOrder::Say { .. } => "say",
            },
        }
    }
}

/// One incoming slash command, discarded once answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub invoker: UserId,
    pub command: Command,
}
