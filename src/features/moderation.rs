use crate::{
    models::{
        embed::{Embed, Reply},
        moderation::{
            Actor, AuditRecord, ModerationAction, ModerationOrder, Sanction, DEFAULT_REASON,
            MAX_AUDIT_ENTRIES, MAX_CLEAR_AMOUNT, MAX_TIMEOUT_MINUTES,
        },
    },
    responder::Session,
    util::minutes_to_duration,
    Error,
};

use super::guard::{Decision, Policy};

pub const INVALID_DURATION: &str = "Duration must be between 1 minute and 28 days (40320 minutes).";
pub const INVALID_AMOUNT: &str = "Amount must be between 1 and 100.";
pub const INVALID_LIMIT: &str = "Limit must be between 1 and 25.";
pub const NOT_MUTED: &str = "This user is not currently muted.";
pub const NOT_TEXT_CHANNEL: &str = "Must be a text channel.";
pub const ALREADY_ASSIGNED: &str = "User already has the role.";
pub const EMPTY_MESSAGE: &str = "Message can't be empty.";
pub const UNRESOLVED_MEMBER: &str = "Unable to verify your permissions right now. Please try again.";

fn reason_or_default(reason: Option<String>) -> String {
    reason
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .unwrap_or(DEFAULT_REASON.to_string())
}

/// What an authorized order turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Planned {
    /// Perform the sanction, then answer with the reply.
    Sanction(Sanction, Reply),
    /// Read the newest entries of the audit log and show them to the invoker.
    AuditLog { limit: u8 },
}

/// Turns an order into the call to perform and the reply announcing its
/// success, or into a message explaining why it can't be performed.
pub fn plan(order: ModerationOrder) -> Result<Planned, &'static str> {
    let action = order.action();
    let embed = action.create_embed();
    let (sanction, reply) = match order {
        ModerationOrder::Ban { target, reason } => {
            let reason = reason_or_default(reason);
            (
                Sanction::Ban {
                    user: target.id,
                    reason: reason.clone(),
                },
                Reply::public(
                    embed.description(format!("Banned {} for: {}", target.mention(), reason)),
                ),
            )
        }
        ModerationOrder::Kick { target, reason } => {
            let reason = reason_or_default(reason);
            (
                Sanction::Kick {
                    user: target.id,
                    reason: reason.clone(),
                },
                Reply::public(
                    embed.description(format!("Kicked {} for: {}", target.mention(), reason)),
                ),
            )
        }
        ModerationOrder::Mute {
            target,
            minutes,
            reason,
        } => {
            if !(1..=MAX_TIMEOUT_MINUTES).contains(&minutes) {
                return Err(INVALID_DURATION);
            }
            let duration = minutes_to_duration(minutes).ok_or(INVALID_DURATION)?;
            let reason = reason_or_default(reason);
            (
                Sanction::Timeout {
                    user: target.id,
                    duration,
                    reason: reason.clone(),
                },
                Reply::public(embed.description(format!(
                    "Muted {} for {} minutes: {}",
                    target.mention(),
                    minutes,
                    reason
                ))),
            )
        }
        ModerationOrder::Unmute { target } => {
            if !target.timed_out {
                return Err(NOT_MUTED);
            }
            (
                Sanction::RemoveTimeout { user: target.id },
                Reply::public(embed.description(format!("Unmuted {}.", target.mention()))),
            )
        }
        ModerationOrder::Clear { amount } => {
            if !(1..=MAX_CLEAR_AMOUNT).contains(&amount) {
                return Err(INVALID_AMOUNT);
            }
            let count: u8 = amount.try_into().map_err(|_| INVALID_AMOUNT)?;
            (
                Sanction::Purge { count },
                Reply::private_embed(embed.description(format!("Deleted {} messages", amount))),
            )
        }
        ModerationOrder::Lock { channel } | ModerationOrder::Unlock { channel } => {
            if !channel.text {
                return Err(NOT_TEXT_CHANNEL);
            }
            let locked = action == ModerationAction::Lock;
            let verb = if locked { "Locked" } else { "Unlocked" };
            (
                Sanction::SetChannelLock {
                    channel: channel.id,
                    locked,
                    announcement: embed,
                },
                Reply::private(format!("{} {}.", verb, channel.mention())),
            )
        }
        ModerationOrder::AssignRole {
            target,
            role,
            already_assigned,
        } => {
            if already_assigned {
                return Err(ALREADY_ASSIGNED);
            }
            (
                Sanction::AddRole {
                    user: target.id,
                    role,
                },
                Reply::public(embed.description(format!(
                    "Assigned <@&{}> to {}.",
                    role.get(),
                    target.mention()
                ))),
            )
        }
        ModerationOrder::Audit { limit } => {
            if !(1..=MAX_AUDIT_ENTRIES).contains(&limit) {
                return Err(INVALID_LIMIT);
            }
            let limit: u8 = limit.try_into().map_err(|_| INVALID_LIMIT)?;
            return Ok(Planned::AuditLog { limit });
        }
        ModerationOrder::Say { channel, message } => {
            if message.trim().is_empty() {
                return Err(EMPTY_MESSAGE);
            }
            (
                Sanction::Say { channel, message },
                Reply::private("Message sent."),
            )
        }
    };
    Ok(Planned::Sanction(sanction, reply))
}

pub fn audit_embed(records: &[AuditRecord]) -> Embed {
    let embed = ModerationAction::Audit.create_embed();
    if records.is_empty() {
        return embed.description("No recent entries.");
    }
    records.iter().fold(embed, |embed, record| {
        embed.field(
            &record.action,
            format!(
                "By: <@{}>\nTarget: {}\nReason: {}\nTime: <t:{}:R>",
                record.executor.get(),
                record.target.as_deref().unwrap_or("N/A"),
                record.reason.as_deref().unwrap_or("N/A"),
                record.created_at
            ),
            false,
        )
    })
}

/// Authorizes, performs and reports one moderation order.
///
/// Every path answers exactly once. Denials, rejected arguments and failed
/// actions are only shown to the invoker; a failure's cause goes to the log.
pub async fn moderate(
    session: &mut Session<'_>,
    policy: &dyn Policy,
    actor: &Actor,
    order: ModerationOrder,
) -> Result<(), Error> {
    let action: ModerationAction = order.action();
    if let Decision::Deny { reason } = policy.authorize(actor, action) {
        log::info!(
            target: "beambot::moderation",
            "Denied {:?} for @{}",
            action,
            actor.id
        );
        return session.respond(Reply::private(reason)).await;
    }
    let planned = match plan(order) {
        Ok(x) => x,
        Err(message) => return session.respond(Reply::private(message)).await,
    };
    let result = match planned {
        Planned::Sanction(sanction, reply) => session.execute(&sanction).await.map(|()| {
            log::info!(
                target: "beambot::moderation",
                "@{} performed {:?}",
                actor.id,
                sanction
            );
            reply
        }),
        Planned::AuditLog { limit } => session
            .audit_log(limit)
            .await
            .map(|records| Reply::private_embed(audit_embed(&records))),
    };
    match result {
        Ok(reply) => session.respond(reply).await,
        Err(err) => {
            log::warn!("Unable to perform {:?}: {}", action, err);
            session
                .respond(Reply::private(action.failure_message()))
                .await
        }
    }
}

/// Answers an order whose invoker couldn't be looked up, so the invocation
/// doesn't go unanswered.
pub async fn reject_unresolved(session: &mut Session<'_>, err: Error) -> Result<(), Error> {
    log::warn!("Unable to resolve the invoking member: {}", err);
    session.respond(Reply::private(UNRESOLVED_MEMBER)).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serenity::all::{ChannelId, Permissions, RoleId, UserId};

    use super::*;
    use crate::{
        features::guard::{RolePolicy, DENIED_MESSAGE},
        models::{
            embed::HAPPY_BEAMING,
            moderation::{ChannelTarget, Target},
        },
        responder::{
            testing::{RecordingResponder, Sent},
            ResponseState,
        },
    };

    fn text_channel() -> ChannelTarget {
        ChannelTarget {
            id: ChannelId::new(300),
            text: true,
        }
    }

    fn moderator() -> Actor {
        actor(&["Moderator"], Permissions::empty())
    }

    fn target() -> Target {
        Target {
            id: UserId::new(42),
            timed_out: false,
        }
    }

    fn actor(roles: &[&str], permissions: Permissions) -> Actor {
        Actor {
            id: UserId::new(7),
            role_names: roles.iter().map(|x| x.to_string()).collect(),
            permissions,
        }
    }

    fn orders() -> Vec<ModerationOrder> {
        vec![
            ModerationOrder::Ban {
                target: target(),
                reason: None,
            },
            ModerationOrder::Kick {
                target: target(),
                reason: Some("spam".to_string()),
            },
            ModerationOrder::Mute {
                target: target(),
                minutes: 10,
                reason: None,
            },
        ]
    }

    async fn run(responder: &RecordingResponder, actor: &Actor, order: ModerationOrder) {
        let mut session = Session::new(responder);
        moderate(&mut session, &RolePolicy, actor, order)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_denied_actor_never_reaches_the_action() {
        let member = actor(&["Beamer"], Permissions::SEND_MESSAGES);
        for order in orders() {
            let responder = RecordingResponder::default();
            run(&responder, &member, order).await;
            assert!(responder.sanctions().is_empty());
            assert_eq!(responder.replies(), vec![Reply::private(DENIED_MESSAGE)]);
        }
    }

    #[tokio::test]
    async fn test_administrator_without_specific_flags() {
        let admin = actor(&[], Permissions::ADMINISTRATOR);
        for order in orders() {
            let responder = RecordingResponder::default();
            run(&responder, &admin, order).await;
            assert_eq!(responder.sanctions().len(), 1);
            let replies = responder.replies();
            assert_eq!(replies.len(), 1);
            assert!(!replies[0].ephemeral);
        }
    }

    #[tokio::test]
    async fn test_ban_uses_default_reason() {
        let responder = RecordingResponder::default();
        run(
            &responder,
            &actor(&["Moderator"], Permissions::empty()),
            ModerationOrder::Ban {
                target: target(),
                reason: None,
            },
        )
        .await;
        assert_eq!(
            responder.sanctions(),
            vec![Sanction::Ban {
                user: UserId::new(42),
                reason: "No reason provided".to_string(),
            }]
        );
        let embed = responder.replies()[0].embed.clone().unwrap();
        assert_eq!(embed.title, "User Banned");
        assert_eq!(
            embed.description.as_deref(),
            Some("Banned <@42> for: No reason provided")
        );
        assert_eq!(embed.footer.as_deref(), Some(HAPPY_BEAMING));
    }

    fn planned_sanction(order: ModerationOrder) -> Sanction {
        match plan(order).unwrap() {
            Planned::Sanction(sanction, _) => sanction,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_blank_reason_uses_default() {
        let sanction = planned_sanction(ModerationOrder::Kick {
            target: target(),
            reason: Some("   ".to_string()),
        });
        assert_eq!(
            sanction,
            Sanction::Kick {
                user: UserId::new(42),
                reason: DEFAULT_REASON.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_action_reports_privately() {
        let moderator = actor(&["Moderator"], Permissions::empty());
        for order in orders() {
            let action = order.action();
            let responder = RecordingResponder::failing();
            run(&responder, &moderator, order).await;
            assert_eq!(responder.sanctions().len(), 1);
            assert_eq!(
                responder.replies(),
                vec![Reply::private(action.failure_message())]
            );
        }
    }

    #[tokio::test]
    async fn test_mute_converts_minutes() {
        let responder = RecordingResponder::default();
        run(
            &responder,
            &actor(&[], Permissions::MODERATE_MEMBERS),
            ModerationOrder::Mute {
                target: target(),
                minutes: 15,
                reason: Some("flood".to_string()),
            },
        )
        .await;
        assert_eq!(
            responder.sanctions(),
            vec![Sanction::Timeout {
                user: UserId::new(42),
                duration: Duration::from_secs(900),
                reason: "flood".to_string(),
            }]
        );
        assert_eq!(
            responder.replies()[0].embed.as_ref().unwrap().description.as_deref(),
            Some("Muted <@42> for 15 minutes: flood")
        );
    }

    #[tokio::test]
    async fn test_mute_out_of_range_is_rejected() {
        let moderator = actor(&["Moderator"], Permissions::empty());
        for minutes in [0, -3, MAX_TIMEOUT_MINUTES + 1] {
            let responder = RecordingResponder::default();
            run(
                &responder,
                &moderator,
                ModerationOrder::Mute {
                    target: target(),
                    minutes,
                    reason: None,
                },
            )
            .await;
            assert!(responder.sanctions().is_empty());
            assert_eq!(responder.replies(), vec![Reply::private(INVALID_DURATION)]);
        }
    }

    #[test]
    fn test_mute_accepts_platform_maximum() {
        let sanction = planned_sanction(ModerationOrder::Mute {
            target: target(),
            minutes: MAX_TIMEOUT_MINUTES,
            reason: None,
        });
        assert!(matches!(
            sanction,
            Sanction::Timeout { duration, .. } if duration == Duration::from_secs(28 * 24 * 3600)
        ));
    }

    #[tokio::test]
    async fn test_unmute_requires_timeout() {
        let moderator = actor(&["Moderator"], Permissions::empty());
        let responder = RecordingResponder::default();
        run(
            &responder,
            &moderator,
            ModerationOrder::Unmute { target: target() },
        )
        .await;
        assert!(responder.sanctions().is_empty());
        assert_eq!(responder.replies(), vec![Reply::private(NOT_MUTED)]);

        let responder = RecordingResponder::default();
        let muted = Target {
            timed_out: true,
            ..target()
        };
        run(&responder, &moderator, ModerationOrder::Unmute { target: muted }).await;
        assert_eq!(
            responder.sanctions(),
            vec![Sanction::RemoveTimeout {
                user: UserId::new(42)
            }]
        );
    }

    #[tokio::test]
    async fn test_clear_needs_manage_messages() {
        let responder = RecordingResponder::default();
        run(
            &responder,
            &actor(&[], Permissions::BAN_MEMBERS),
            ModerationOrder::Clear { amount: 5 },
        )
        .await;
        assert!(responder.sanctions().is_empty());

        let responder = RecordingResponder::default();
        run(
            &responder,
            &actor(&[], Permissions::MANAGE_MESSAGES),
            ModerationOrder::Clear { amount: 5 },
        )
        .await;
        assert_eq!(responder.sanctions(), vec![Sanction::Purge { count: 5 }]);
        let replies = responder.replies();
        assert!(replies[0].ephemeral);
    }

    #[test]
    fn test_clear_bounds() {
        assert_eq!(plan(ModerationOrder::Clear { amount: 0 }).unwrap_err(), INVALID_AMOUNT);
        assert_eq!(plan(ModerationOrder::Clear { amount: 101 }).unwrap_err(), INVALID_AMOUNT);
        assert!(plan(ModerationOrder::Clear { amount: 100 }).is_ok());
    }

    #[tokio::test]
    async fn test_failed_confirmation_is_not_retried() {
        let responder = RecordingResponder::failing_sends();
        let mut session = Session::new(&responder);
        let result = moderate(
            &mut session,
            &RolePolicy,
            &moderator(),
            ModerationOrder::Ban {
                target: target(),
                reason: None,
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(session.state(), ResponseState::Responded);
        let sent = responder.sent();
        assert_eq!(sent.len(), 2);
        assert!(matches!(sent[0], Sent::Execute(Sanction::Ban { .. })));
        assert!(matches!(sent[1], Sent::Respond(_)));
    }

    #[tokio::test]
    async fn test_unresolved_member_gets_an_answer() {
        let responder = RecordingResponder::default();
        let mut session = Session::new(&responder);
        reject_unresolved(&mut session, "Unknown Member".into())
            .await
            .unwrap();
        assert_eq!(session.state(), ResponseState::Responded);
        assert!(responder.sanctions().is_empty());
        assert_eq!(responder.replies(), vec![Reply::private(UNRESOLVED_MEMBER)]);
    }

    #[tokio::test]
    async fn test_lock_announces_and_confirms_privately() {
        let responder = RecordingResponder::default();
        run(
            &responder,
            &actor(&[], Permissions::MANAGE_CHANNELS),
            ModerationOrder::Lock {
                channel: text_channel(),
            },
        )
        .await;
        let sanctions = responder.sanctions();
        let Sanction::SetChannelLock {
            channel,
            locked,
            announcement,
        } = &sanctions[0]
        else {
            panic!("unexpected {:?}", sanctions[0]);
        };
        assert_eq!(*channel, ChannelId::new(300));
        assert!(*locked);
        assert_eq!(announcement.title, "CHANNEL LOCKED");
        assert_eq!(responder.replies(), vec![Reply::private("Locked <#300>.")]);
    }

    #[tokio::test]
    async fn test_unlock_needs_text_channel() {
        let responder = RecordingResponder::default();
        run(
            &responder,
            &moderator(),
            ModerationOrder::Unlock {
                channel: ChannelTarget {
                    text: false,
                    ..text_channel()
                },
            },
        )
        .await;
        assert!(responder.sanctions().is_empty());
        assert_eq!(responder.replies(), vec![Reply::private(NOT_TEXT_CHANNEL)]);

        let sanction = planned_sanction(ModerationOrder::Unlock {
            channel: text_channel(),
        });
        assert!(matches!(
            sanction,
            Sanction::SetChannelLock { locked: false, ref announcement, .. }
                if announcement.title == "CHANNEL UNLOCKED"
        ));
    }

    #[tokio::test]
    async fn test_manage_channels_does_not_unlock_bans() {
        let responder = RecordingResponder::default();
        run(
            &responder,
            &actor(&[], Permissions::MANAGE_CHANNELS),
            ModerationOrder::Ban {
                target: target(),
                reason: None,
            },
        )
        .await;
        assert!(responder.sanctions().is_empty());
        assert_eq!(responder.replies(), vec![Reply::private(DENIED_MESSAGE)]);
    }

    #[tokio::test]
    async fn test_assign_role() {
        let responder = RecordingResponder::default();
        run(
            &responder,
            &actor(&[], Permissions::MANAGE_ROLES),
            ModerationOrder::AssignRole {
                target: target(),
                role: RoleId::new(77),
                already_assigned: false,
            },
        )
        .await;
        assert_eq!(
            responder.sanctions(),
            vec![Sanction::AddRole {
                user: UserId::new(42),
                role: RoleId::new(77),
            }]
        );
        let replies = responder.replies();
        assert!(!replies[0].ephemeral);
        assert_eq!(
            replies[0].embed.as_ref().unwrap().description.as_deref(),
            Some("Assigned <@&77> to <@42>.")
        );
    }

    #[test]
    fn test_assign_role_twice_is_rejected() {
        assert_eq!(
            plan(ModerationOrder::AssignRole {
                target: target(),
                role: RoleId::new(77),
                already_assigned: true,
            })
            .unwrap_err(),
            ALREADY_ASSIGNED
        );
    }

    #[tokio::test]
    async fn test_audit_lists_entries_privately() {
        let records = vec![
            AuditRecord {
                action: "Member(BanAdd)".to_string(),
                executor: UserId::new(7),
                target: Some("<@42>".to_string()),
                reason: None,
                created_at: 1_700_000_000,
            },
            AuditRecord {
                action: "Role(Create)".to_string(),
                executor: UserId::new(8),
                target: None,
                reason: Some("setup".to_string()),
                created_at: 1_700_000_100,
            },
        ];
        let responder = RecordingResponder::with_audit(records);
        run(
            &responder,
            &actor(&[], Permissions::VIEW_AUDIT_LOG),
            ModerationOrder::Audit { limit: 10 },
        )
        .await;
        assert!(responder.sanctions().is_empty());
        let replies = responder.replies();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].ephemeral);
        let embed = replies[0].embed.as_ref().unwrap();
        assert_eq!(embed.title, "Audit Logs");
        assert_eq!(embed.fields.len(), 2);
        assert_eq!(embed.fields[0].name, "Member(BanAdd)");
        assert_eq!(
            embed.fields[0].value,
            "By: <@7>\nTarget: <@42>\nReason: N/A\nTime: <t:1700000000:R>"
        );
        assert!(embed.fields[1].value.contains("Target: N/A\nReason: setup"));
    }

    #[tokio::test]
    async fn test_audit_failure_reports_privately() {
        let responder = RecordingResponder::failing();
        run(&responder, &moderator(), ModerationOrder::Audit { limit: 5 }).await;
        assert_eq!(
            responder.replies(),
            vec![Reply::private(ModerationAction::Audit.failure_message())]
        );
    }

    #[test]
    fn test_audit_limit_bounds() {
        assert_eq!(plan(ModerationOrder::Audit { limit: 0 }).unwrap_err(), INVALID_LIMIT);
        assert_eq!(plan(ModerationOrder::Audit { limit: 26 }).unwrap_err(), INVALID_LIMIT);
        assert_eq!(
            plan(ModerationOrder::Audit { limit: 25 }),
            Ok(Planned::AuditLog { limit: 25 })
        );
    }

    #[test]
    fn test_empty_audit_log() {
        let embed = audit_embed(&[]);
        assert!(embed.fields.is_empty());
        assert_eq!(embed.description.as_deref(), Some("No recent entries."));
    }

    #[tokio::test]
    async fn test_say_sends_text_and_confirms_privately() {
        let responder = RecordingResponder::default();
        run(
            &responder,
            &actor(&[], Permissions::MANAGE_MESSAGES),
            ModerationOrder::Say {
                channel: ChannelId::new(300),
                message: "@everyone hello".to_string(),
            },
        )
        .await;
        assert_eq!(
            responder.sanctions(),
            vec![Sanction::Say {
                channel: ChannelId::new(300),
                message: "@everyone hello".to_string(),
            }]
        );
        assert_eq!(responder.replies(), vec![Reply::private("Message sent.")]);
    }

    #[test]
    fn test_blank_message_is_rejected() {
        assert_eq!(
            plan(ModerationOrder::Say {
                channel: ChannelId::new(300),
                message: "  ".to_string(),
            })
            .unwrap_err(),
            EMPTY_MESSAGE
        );
    }
}
