use poise::Command as PoiseCommand;
use serenity::all::Permissions;

use crate::{
    features::router::dispatch,
    models::{
        invocation::{Command, Invocation},
        moderation::Actor,
    },
    responder::{PoiseResponder, Session},
    Context, Data, Error,
};

mod guides;
mod info;
mod moderation;

pub fn build_commands() -> Vec<PoiseCommand<Data, Error>> {
    vec![
        guides::tutorials(),
        guides::method(),

        moderation::ban(),
        moderation::kick(),
        moderation::mute(),
        moderation::unmute(),
        moderation::clear(),
        moderation::lock(),
        moderation::unlock(),
        moderation::role(),
        moderation::audit(),
        moderation::say(),

        info::getserver(),
        info::dice(),
        info::coin(),
        info::usage(),
        info::uptime(),
        info::ping(),
        info::help(),
        info::invite(),
    ]
}

async fn run(cx: Context<'_>, command: Command) -> Result<(), Error> {
    let responder = PoiseResponder::new(cx);
    let mut session = Session::new(&responder);
    dispatch(
        &mut session,
        cx.data(),
        Invocation {
            invoker: cx.author().id,
            command,
        },
    )
    .await
}

/// Collects the invoking member's role names and guild permissions.
async fn invoking_actor(cx: Context<'_>) -> Result<Actor, Error> {
    let member = cx
        .author_member()
        .await
        .ok_or("Unable to resolve the invoking member")?;
    let permissions = member.permissions.unwrap_or(Permissions::empty());
    let cached: Option<Vec<String>> = cx.guild().map(|guild| {
        member
            .roles
            .iter()
            .filter_map(|id| guild.roles.get(id))
            .map(|x| x.name.clone())
            .collect()
    });
    let role_names = match cached {
        Some(x) => x,
        None => {
            let roles = cx
                .guild_id()
                .ok_or("Roles are only available in guilds")?
                .roles(cx.http())
                .await?;
            member
                .roles
                .iter()
                .filter_map(|id| roles.get(id))
                .map(|x| x.name.clone())
                .collect()
        }
    };
    Ok(Actor {
        id: member.user.id,
        role_names,
        permissions,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::content::CATALOGUE;

    #[test]
    fn test_help_covers_registered_commands() {
        let registered: HashSet<String> = build_commands()
            .into_iter()
            .flat_map(|x| {
                if x.subcommands.is_empty() {
                    vec![x.name]
                } else {
                    x.subcommands
                        .into_iter()
                        .map(|sub| format!("{} {}", x.name, sub.name))
                        .collect()
                }
            })
            .collect();
        let documented: HashSet<String> = CATALOGUE
            .help()
            .iter()
            .map(|x| x.command.to_string())
            .collect();
        assert_eq!(registered, documented);
    }

    #[test]
    fn test_every_command_is_a_slash_command() {
        let commands = build_commands();
        let subcommands = commands.iter().flat_map(|x| x.subcommands.iter());
        for command in commands.iter().chain(subcommands) {
            assert!(command.slash_action.is_some(), "{} is not a slash command", command.name);
            assert!(command.description.is_some(), "{} has no description", command.name);
        }
    }
}
