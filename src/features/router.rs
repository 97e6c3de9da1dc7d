use crate::{
    data::Data,
    models::{
        content::ContentKey,
        embed::Reply,
        invocation::{Command, Invocation},
    },
    responder::Session,
    Error,
};

use super::{info, moderation::moderate};

/// Runs the handler of one invocation. Every command answers exactly once
/// through `session`; multi-page content adds its follow-ups after that.
pub async fn dispatch(
    session: &mut Session<'_>,
    data: &Data,
    invocation: Invocation,
) -> Result<(), Error> {
    log::debug!(
        "@{} invoked \"{}\"",
        invocation.invoker,
        invocation.command.name()
    );
    match invocation.command {
        Command::Tutorials(option) => {
            log::debug!("Sending the \"{}\" tutorial", option.key());
            info::send_pages(session, data.catalogue, ContentKey::Tutorial(option)).await
        }
        Command::Method => info::send_pages(session, data.catalogue, ContentKey::Method).await,
        Command::Help => {
            session
                .respond(Reply::private_embed(info::help_embed(data.catalogue)))
                .await
        }
        Command::Ping => session.respond(Reply::private("Pong!")).await,
        Command::Uptime => {
            session
                .respond(Reply::public(info::uptime_embed(data.started_at)))
                .await
        }
        Command::Invite => {
            session
                .respond(Reply::private_embed(info::invite_embed(data.bot_id)))
                .await
        }
        Command::Usage(query) => {
            session
                .respond(info::usage_reply(data.catalogue, query.as_deref()))
                .await
        }
        Command::ServerInfo => {
            info::send_guild_details(session, |guild| {
                Reply::private_embed(info::server_info_embed(guild))
            })
            .await
        }
        Command::ServerIcon => info::send_guild_details(session, info::server_icon_reply).await,
        Command::Dice(sides) => {
            let reply = info::dice_reply(&mut rand::rng(), sides);
            session.respond(reply).await
        }
        Command::Coin => {
            let reply = info::coin_reply(&mut rand::rng());
            session.respond(reply).await
        }
        Command::Moderate { actor, order } => {
            moderate(session, data.policy.as_ref(), &actor, order).await
        }
    }
}
