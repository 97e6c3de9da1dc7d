use chrono::Utc;
use poise::CreateReply;
use serenity::{
    all::{
        audit_log::Action, ChannelId, CreateAllowedMentions, CreateEmbed, CreateMessage, EditMember,
        GetMessages, GuildId, MessageId, PermissionOverwrite, PermissionOverwriteType,
        Permissions, RoleId, Timestamp,
    },
    async_trait,
};

use crate::{
    models::{
        embed::Reply,
        guild::GuildOverview,
        moderation::{AuditRecord, Sanction},
    },
    Context, Error,
};

/// Messages older than this can't be bulk deleted.
const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// What `@everyone` loses in a locked channel.
const LOCKED_PERMISSIONS: Permissions = Permissions::SEND_MESSAGES.union(Permissions::ATTACH_FILES);

/// The slice of the bot framework a command handler talks to.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Acknowledge the command without content, extending the reply deadline.
    async fn defer(&self, ephemeral: bool) -> Result<(), Error>;

    /// Send the primary response.
    async fn respond(&self, reply: Reply) -> Result<(), Error>;

    /// Send an additional message after the primary response.
    async fn follow_up(&self, reply: Reply) -> Result<(), Error>;

    /// Perform a privileged action on the guild.
    async fn execute(&self, sanction: &Sanction) -> Result<(), Error>;

    /// The newest `limit` entries of the guild's audit log.
    async fn audit_log(&self, limit: u8) -> Result<Vec<AuditRecord>, Error>;

    async fn guild_overview(&self) -> Result<GuildOverview, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    Received,
    Deferred,
    Responded,
}

/// Tracks one invocation through `received -> (deferred) -> responded` and
/// refuses any send that would break that order.
pub struct Session<'a> {
    responder: &'a dyn Responder,
    state: ResponseState,
}

impl<'a> Session<'a> {
    pub fn new(responder: &'a dyn Responder) -> Self {
        Session {
            responder,
            state: ResponseState::Received,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ResponseState {
        self.state
    }

    pub async fn defer(&mut self, ephemeral: bool) -> Result<(), Error> {
        if self.state != ResponseState::Received {
            return Err(format!("Unable to defer an invocation in state {:?}", self.state).into());
        }
        self.responder.defer(ephemeral).await?;
        self.state = ResponseState::Deferred;
        Ok(())
    }

    pub async fn respond(&mut self, reply: Reply) -> Result<(), Error> {
        if self.state == ResponseState::Responded {
            return Err("The invocation has already been responded to".into());
        }
        // a failed send still ends the invocation
        self.state = ResponseState::Responded;
        self.responder.respond(reply).await
    }

    pub async fn follow_up(&mut self, reply: Reply) -> Result<(), Error> {
        if self.state != ResponseState::Responded {
            return Err("Unable to follow up before the primary response".into());
        }
        self.responder.follow_up(reply).await
    }

    pub async fn execute(&self, sanction: &Sanction) -> Result<(), Error> {
        self.responder.execute(sanction).await
    }

    pub async fn audit_log(&self, limit: u8) -> Result<Vec<AuditRecord>, Error> {
        self.responder.audit_log(limit).await
    }

    pub async fn guild_overview(&self) -> Result<GuildOverview, Error> {
        self.responder.guild_overview().await
    }
}

impl From<Reply> for CreateReply {
    fn from(value: Reply) -> Self {
        let mut reply = CreateReply::default().ephemeral(value.ephemeral);
        if let Some(content) = value.content {
            reply = reply.content(content);
        }
        if let Some(embed) = value.embed {
            reply = reply.embed(CreateEmbed::from(embed));
        }
        reply
    }
}

/// [`Responder`] backed by a live poise invocation.
pub struct PoiseResponder<'a> {
    cx: Context<'a>,
}

impl<'a> PoiseResponder<'a> {
    pub fn new(cx: Context<'a>) -> Self {
        PoiseResponder { cx }
    }

    fn guild_id(&self) -> Result<GuildId, Error> {
        Ok(self
            .cx
            .guild_id()
            .ok_or("Only available in guilds")?)
    }

    /// Adds or lifts the lock bits on the `@everyone` overwrite, keeping the
    /// rest of it as it was.
    async fn set_channel_lock(
        &self,
        guild: GuildId,
        channel: ChannelId,
        locked: bool,
    ) -> Result<(), Error> {
        let serenity_cx = self.cx.serenity_context();
        let kind = PermissionOverwriteType::Role(RoleId::new(guild.get()));
        let current = channel
            .to_channel(serenity_cx)
            .await?
            .guild()
            .ok_or("Only guild channels can be locked")?;
        let (allow, deny) = current
            .permission_overwrites
            .iter()
            .find(|x| x.kind == kind)
            .map(|x| (x.allow, x.deny))
            .unwrap_or((Permissions::empty(), Permissions::empty()));
        let overwrite = if locked {
            PermissionOverwrite {
                allow: allow.difference(LOCKED_PERMISSIONS),
                deny: deny.union(LOCKED_PERMISSIONS),
                kind,
            }
        } else {
            PermissionOverwrite {
                allow,
                deny: deny.difference(LOCKED_PERMISSIONS),
                kind,
            }
        };
        if overwrite.allow.is_empty() && overwrite.deny.is_empty() {
            channel.delete_permission(serenity_cx, kind).await?;
        } else {
            channel.create_permission(serenity_cx, overwrite).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Responder for PoiseResponder<'_> {
    async fn defer(&self, ephemeral: bool) -> Result<(), Error> {
        if ephemeral {
            self.cx.defer_ephemeral().await?;
        } else {
            self.cx.defer().await?;
        }
        Ok(())
    }

    async fn respond(&self, reply: Reply) -> Result<(), Error> {
        // poise turns the first send into the interaction response (or completes
        // the deferred one) and every later send into a follow-up
        self.cx.send(reply.into()).await?;
        Ok(())
    }

    async fn follow_up(&self, reply: Reply) -> Result<(), Error> {
        self.cx.send(reply.into()).await?;
        Ok(())
    }

    async fn execute(&self, sanction: &Sanction) -> Result<(), Error> {
        let guild = self.guild_id()?;
        let http = self.cx.http();
        match sanction {
            Sanction::Ban { user, reason } => {
                guild.ban_with_reason(http, *user, 0, reason).await?;
            }
            Sanction::Kick { user, reason } => {
                guild.kick_with_reason(http, *user, reason).await?;
            }
            Sanction::Timeout {
                user,
                duration,
                reason,
            } => {
                let secs: i64 = duration.as_secs().try_into()?;
                let until = Timestamp::from_unix_timestamp(Utc::now().timestamp() + secs)?;
                guild
                    .edit_member(
                        http,
                        *user,
                        EditMember::new()
                            .disable_communication_until_datetime(until)
                            .audit_log_reason(reason),
                    )
                    .await?;
            }
            Sanction::RemoveTimeout { user } => {
                guild
                    .edit_member(
                        http,
                        *user,
                        EditMember::new()
                            .enable_communication()
                            .audit_log_reason("Unmuted"),
                    )
                    .await?;
            }
            Sanction::Purge { count } => {
                let channel = self.cx.channel_id();
                let oldest = Utc::now().timestamp() - BULK_DELETE_MAX_AGE_SECS;
                let ids: Vec<MessageId> = channel
                    .messages(http, GetMessages::new().limit(*count))
                    .await?
                    .into_iter()
                    .filter(|x| x.timestamp.unix_timestamp() > oldest)
                    .map(|x| x.id)
                    .collect();
                // bulk delete only accepts 2 to 100 messages
                match ids.len() {
                    0 => {}
                    1 => channel.delete_message(http, ids[0]).await?,
                    _ => channel.delete_messages(http, ids).await?,
                }
            }
            Sanction::SetChannelLock {
                channel,
                locked,
                announcement,
            } => {
                self.set_channel_lock(guild, *channel, *locked).await?;
                channel
                    .send_message(
                        http,
                        CreateMessage::new().embed(CreateEmbed::from(announcement.clone())),
                    )
                    .await?;
            }
            Sanction::AddRole { user, role } => {
                let author = self.cx.author();
                http.add_member_role(
                    guild,
                    *user,
                    *role,
                    Some(format!("Given by @{} ({})", author.name, author.id).as_ref()),
                )
                .await?;
            }
            Sanction::Say { channel, message } => {
                channel
                    .send_message(
                        http,
                        CreateMessage::new()
                            .content(message.clone())
                            .allowed_mentions(CreateAllowedMentions::new()),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    async fn audit_log(&self, limit: u8) -> Result<Vec<AuditRecord>, Error> {
        let logs = self
            .guild_id()?
            .audit_logs(self.cx.http(), None, None, None, Some(limit))
            .await?;
        Ok(logs
            .entries
            .into_iter()
            .map(|entry| {
                let target = entry.target_id.map(|id| match entry.action {
                    Action::Member(_) => format!("<@{}>", id.get()),
                    Action::Channel(_) => format!("<#{}>", id.get()),
                    Action::Role(_) => format!("<@&{}>", id.get()),
                    _ => format!("`{}`", id.get()),
                });
                AuditRecord {
                    action: format!("{:?}", entry.action),
                    executor: entry.user_id,
                    target,
                    reason: entry.reason,
                    created_at: entry.id.created_at().unix_timestamp(),
                }
            })
            .collect())
    }

    async fn guild_overview(&self) -> Result<GuildOverview, Error> {
        let guild_id = self.guild_id()?;
        let cached = self.cx.guild().map(|guild| GuildOverview {
            id: guild.id,
            name: guild.name.clone(),
            member_count: guild.member_count,
            channel_count: guild.channels.len(),
            role_count: guild.roles.len().saturating_sub(1),
            created_at: guild.id.created_at().unix_timestamp(),
            icon_url: guild.icon_url(),
        });
        if let Some(overview) = cached {
            return Ok(overview);
        }
        let http = self.cx.http();
        let guild = guild_id.to_partial_guild_with_counts(http).await?;
        let channels = guild_id.channels(http).await?;
        Ok(GuildOverview {
            id: guild.id,
            name: guild.name.clone(),
            member_count: guild.approximate_member_count.unwrap_or_default(),
            channel_count: channels.len(),
            role_count: guild.roles.len().saturating_sub(1),
            created_at: guild_id.created_at().unix_timestamp(),
            icon_url: guild.icon_url(),
        })
    }
}
