use crate::{models::invocation::Command, Context, Error};

use super::run;

/// Check bot uptime
#[poise::command(slash_command, category = "Info")]
pub async fn uptime(cx: Context<'_>) -> Result<(), Error> {
    run(cx, Command::Uptime).await
}

/// Check if bot is alive
#[poise::command(slash_command, category = "Info")]
pub async fn ping(cx: Context<'_>) -> Result<(), Error> {
    run(cx, Command::Ping).await
}

/// List all commands
#[poise::command(slash_command, category = "Info")]
pub async fn help(cx: Context<'_>) -> Result<(), Error> {
    run(cx, Command::Help).await
}

/// Get bot invite link
#[poise::command(slash_command, category = "Info")]
pub async fn invite(cx: Context<'_>) -> Result<(), Error> {
    run(cx, Command::Invite).await
}

/// Detailed command usage
#[poise::command(slash_command, category = "Info")]
pub async fn usage(
    cx: Context<'_>,
    #[description = "Command name (e.g., ping)"] command: Option<String>,
) -> Result<(), Error> {
    run(cx, Command::Usage(command)).await
}

/// Get server info or icon
#[poise::command(
    slash_command,
    guild_only,
    category = "Info",
    subcommands("server_info", "server_icon")
)]
pub async fn getserver(_cx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Get server info
#[poise::command(slash_command, guild_only, rename = "info")]
pub async fn server_info(cx: Context<'_>) -> Result<(), Error> {
    run(cx, Command::ServerInfo).await
}

/// Get server icon
#[poise::command(slash_command, guild_only, rename = "icon")]
pub async fn server_icon(cx: Context<'_>) -> Result<(), Error> {
    run(cx, Command::ServerIcon).await
}

/// Roll a dice
#[poise::command(slash_command, category = "Fun")]
pub async fn dice(
    cx: Context<'_>,
    #[description = "Number of sides (default 6)"]
    #[min = 1]
    sides: Option<i64>,
) -> Result<(), Error> {
    run(cx, Command::Dice(sides)).await
}

/// Flip a coin
#[poise::command(slash_command, category = "Fun")]
pub async fn coin(cx: Context<'_>) -> Result<(), Error> {
    run(cx, Command::Coin).await
}
