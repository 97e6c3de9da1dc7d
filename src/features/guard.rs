use std::fmt::Debug;

use crate::models::moderation::{Actor, ModerationAction};

/// Name of the role that may use every moderation command.
pub const MODERATOR_ROLE: &str = "Moderator";

pub const DENIED_MESSAGE: &str = "You need Moderator or Admin permissions!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { reason: &'static str },
}

/// Decides whether `actor` may perform `action`.
pub trait Policy: Debug + Send + Sync {
    fn authorize(&self, actor: &Actor, action: ModerationAction) -> Decision;
}

/// Allows holders of the moderator role, administrators, and members with the
/// permission named by [`ModerationAction::required_permission`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl Policy for RolePolicy {
    fn authorize(&self, actor: &Actor, action: ModerationAction) -> Decision {
        if actor.has_role(MODERATOR_ROLE)
            || actor.permissions.administrator()
            || actor.permissions.contains(action.required_permission())
        {
            Decision::Allow
        } else {
            Decision::Deny {
                reason: DENIED_MESSAGE,
            }
        }
    }
}
