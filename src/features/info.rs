use chrono::{DateTime, Utc};
use rand::Rng;
use serenity::all::UserId;

use crate::{
    models::{
        content::{Catalogue, ContentKey},
        embed::{Embed, Reply, HAPPY_BEAMING},
        guild::GuildOverview,
    },
    responder::Session,
    util::{short_commit, uptime_since},
    Error,
};

/// Sends the pages of `key` in order: the first one answers the invocation,
/// the rest follow up. The response is deferred first since some pages are
/// large multi-field embeds.
pub async fn send_pages(
    session: &mut Session<'_>,
    catalogue: &Catalogue,
    key: ContentKey,
) -> Result<(), Error> {
    let Some((first, rest)) = catalogue.pages(key).split_first() else {
        return Err(format!("No content for {:?}", key).into());
    };
    session.defer(false).await?;
    session.respond(Reply::public(first.clone())).await?;
    for page in rest {
        session.follow_up(Reply::public(page.clone())).await?;
    }
    Ok(())
}

pub fn help_embed(catalogue: &Catalogue) -> Embed {
    catalogue.help().iter().fold(
        Embed::new("Bot Commands")
            .description("Here are all available commands:")
            .footer(format!("Use /help to see this list again! {HAPPY_BEAMING}")),
        |embed, entry| embed.field(format!("/{}", entry.command), entry.description, true),
    )
}

/// Usage of the first command equal to or starting with `query`, or of every
/// command when there is no query.
pub fn usage_reply(catalogue: &Catalogue, query: Option<&str>) -> Reply {
    let embed = Embed::new("Command Usage").footer(HAPPY_BEAMING);
    let query = query
        .map(|x| x.trim().trim_start_matches('/').to_lowercase())
        .filter(|x| !x.is_empty());
    let Some(query) = query else {
        return Reply::private_embed(catalogue.help().iter().fold(embed, |embed, entry| {
            embed.field(format!("/{}", entry.command), entry.usage, false)
        }));
    };
    let found = catalogue
        .help()
        .iter()
        .find(|x| x.command == query)
        .or_else(|| catalogue.help().iter().find(|x| x.command.starts_with(&query)));
    match found {
        Some(entry) => Reply::private_embed(
            embed.description(format!("**/{}**\n{}", entry.command, entry.usage)),
        ),
        None => Reply::private(format!(
            "Command \"{}\" not found. Use /usage for all commands.",
            query
        )),
    }
}

pub const DEFAULT_DICE_SIDES: i64 = 6;
pub const INVALID_SIDES: &str = "Please provide a valid number of sides.";

pub fn dice_reply<R: Rng + ?Sized>(rng: &mut R, sides: Option<i64>) -> Reply {
    let sides = sides.unwrap_or(DEFAULT_DICE_SIDES);
    if sides < 1 {
        return Reply::private(INVALID_SIDES);
    }
    let roll = rng.random_range(1..=sides);
    Reply::private_embed(
        Embed::new("Dice Roll")
            .description(format!("You rolled a {}! (1-{})", roll, sides))
            .footer(HAPPY_BEAMING),
    )
}

pub fn coin_reply<R: Rng + ?Sized>(rng: &mut R) -> Reply {
    let side = if rng.random_bool(0.5) { "Heads" } else { "Tails" };
    Reply::private_embed(
        Embed::new("Coin Flip")
            .description(format!("The coin landed on {}!", side))
            .footer(HAPPY_BEAMING),
    )
}

pub const UNKNOWN_GUILD: &str = "Unable to fetch server details right now.";
pub const NO_ICON: &str = "This server has no icon set.";

pub fn server_info_embed(guild: &GuildOverview) -> Embed {
    let embed = Embed::new(guild.name.clone())
        .field("Members", guild.member_count.to_string(), true)
        .field("Channels", guild.channel_count.to_string(), true)
        .field("Roles", guild.role_count.to_string(), true)
        .field("Created", format!("<t:{}:F>", guild.created_at), true)
        .footer(format!("Server ID: {} | {HAPPY_BEAMING}", guild.id.get()));
    match &guild.icon_url {
        Some(icon) => embed.thumbnail(icon),
        None => embed,
    }
}

pub fn server_icon_reply(guild: &GuildOverview) -> Reply {
    match &guild.icon_url {
        Some(icon) => Reply::private_embed(
            Embed::new(format!("{} Icon", guild.name))
                .image(icon)
                .footer(HAPPY_BEAMING),
        ),
        None => Reply::private(NO_ICON),
    }
}

/// Looks up the current guild and answers with `render` of it, or with a
/// generic message when the lookup fails.
pub async fn send_guild_details(
    session: &mut Session<'_>,
    render: fn(&GuildOverview) -> Reply,
) -> Result<(), Error> {
    let reply = match session.guild_overview().await {
        Ok(guild) => render(&guild),
        Err(err) => {
            log::warn!("Unable to fetch the guild overview: {}", err);
            Reply::private(UNKNOWN_GUILD)
        }
    };
    session.respond(reply).await
}

pub fn uptime_embed(started_at: DateTime<Utc>) -> Embed {
    Embed::new("Bot Uptime")
        .description(format!(
            "Bot has been running for {}",
            uptime_since(started_at)
        ))
        .field("Version", format!("`{}`", env!("CARGO_PKG_VERSION")), true)
        .field(
            "Build",
            format!("`{}`", short_commit(option_env!("BUILD_COMMIT"))),
            true,
        )
        .field("Built at", format!("<t:{}>", env!("BUILD_TIME")), false)
        .footer(HAPPY_BEAMING)
}

pub fn invite_url(bot_id: UserId) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={}&permissions=8&scope=bot%20applications.commands",
        bot_id.get()
    )
}

pub fn invite_embed(bot_id: UserId) -> Embed {
    Embed::new("Invite Me!")
        .description(format!(
            "Add me to your server using [this invite link]({}).",
            invite_url(bot_id)
        ))
        .footer(HAPPY_BEAMING)
}
