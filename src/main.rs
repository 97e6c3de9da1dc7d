use std::{env, process, time::Duration};

use chrono::Utc;
use commands::build_commands;
use data::Data;
use event_handler::Handler;
use logging::{log_framework_error, setup_logger, setup_panic_logger_hook};
use poise::FrameworkError;
use serenity::{
    all::{GatewayIntents, GuildId},
    Client,
};
use tokio::signal;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

mod commands;
mod data;
mod embeds;
mod event_handler;
mod features;
mod logging;
mod models;
mod responder;
mod util;

async fn async_main() {
    let started_at = Utc::now();
    let token = env::var("DISCORD_TOKEN").expect("Discord Bot token is required.");
    // registering into a single guild takes effect immediately, handy while developing.
    let sync_guild = env::var("SYNC_GUILD_ID")
        .ok()
        .and_then(|x| x.parse().ok())
        .map(GuildId::new);

    let options = poise::FrameworkOptions::<_, Error> {
        commands: build_commands(),
        on_error: |err: FrameworkError<'_, Data, Error>| {
            Box::pin(async move {
                log_framework_error(&err);
            })
        },
        post_command: |cx: Context<'_>| {
            Box::pin(async move {
                log::info!(target: "beambot::command", "@{} ({}) executed \"{}\"", cx.author().name, cx.author().id, cx.command().qualified_name);
            })
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .setup(move |cx, ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                let synced = match sync_guild {
                    Some(guild) => poise::builtins::register_in_guild(cx, commands, guild).await,
                    None => poise::builtins::register_globally(cx, commands).await,
                };
                // commands stay unavailable until the next successful sync
                match synced {
                    Ok(()) => log::info!("Synced {} command(s).", commands.len()),
                    Err(err) => log::error!("Unable to sync commands: {err}"),
                }
                Ok(Data::new(ready.user.id, started_at))
            })
        })
        .options(options)
        .build();

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MODERATION;

    log::info!("Starting bot...");

    let mut client = Client::builder(token, intents)
        .event_handler(Handler)
        .framework(framework)
        .await
        .expect("Unable to create the client");

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        let shutdown = async move {
            log::info!("Shutting down...");
            tokio::select! {
                _ = async move {
                    shard_manager.shutdown_all().await;
                } => {},
                _ = tokio::time::sleep(Duration::from_secs(5)) => {
                    log::error!("Unable to gracefully shutdown in time.");
                    process::exit(2);
                }
            }
            process::exit(0);
        };
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(x) => x,
            Err(err) => {
                log::error!("Unable to listen for SIGTERM: {err}");
                return;
            }
        };
        tokio::select! {
            _ = signal::ctrl_c() => shutdown.await,
            _ = sigterm.recv() => shutdown.await
        };
    });

    if let Err(err) = client.start().await {
        log::error!("Client error: {err:?}");
    }

    process::exit(1);
}

fn main() {
    // behavior of logger can be configured with environment variables,
    // so loads .env before setting up the logger.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            panic!("{err}");
        }
    }

    setup_logger().expect("Unable to setup logger.");
    setup_panic_logger_hook();

    let _guard;
    if let Ok(sentry_dsn) = env::var("SENTRY_DSN") {
        _guard = sentry::init((
            sentry_dsn,
            sentry::ClientOptions {
                release: Some(
                    format!(
                        "{}@{}{}",
                        env!("CARGO_PKG_NAME"),
                        env!("CARGO_PKG_VERSION"),
                        option_env!("BUILD_COMMIT")
                            .map(|x| format!("+{}", x))
                            .unwrap_or_default()
                    )
                    .into(),
                ),
                ..Default::default()
            },
        ));
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Unable to build the runtime.")
        .block_on(async_main());
}
