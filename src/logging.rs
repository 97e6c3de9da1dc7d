use std::{env, io, panic};

use fern::colors::{Color, ColoredLevelConfig};
use poise::FrameworkError;

use crate::{data::Data, Error};

/// Level of the bot's own log targets, read from `LOG_LEVEL`.
fn crate_level() -> log::LevelFilter {
    env::var("LOG_LEVEL")
        .ok()
        .and_then(|x| x.parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

pub fn setup_logger() -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new().info(Color::BrightBlue);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let time = chrono::Local::now();
            out.finish(format_args!(
                "[{} {} {}] {}",
                time.format("%Y-%m-%d %H:%M:%S%.3f"),
                record.target(),
                colors.color(record.level()),
                message
            ));
        })
        .chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Warn)
                .level_for("beambot", crate_level())
                .chain(io::stdout()),
        )
        .apply()?;
    Ok(())
}

pub fn setup_panic_logger_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|x| x.to_string())
            .unwrap_or("unknown".to_string());
        let payload = info.payload();
        if let Some(msg) = payload.downcast_ref::<&str>() {
            log::error!("Panic occurred at {}: {}", location, msg);
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            log::error!("Panic occurred at {}: {}", location, msg);
        } else {
            log::error!("Panic occurred at {}", location);
        }
        // still calls the default hook for detailed information.
        default_hook(info);
    }));
}

pub fn log_framework_error(err: &FrameworkError<'_, Data, Error>) {
    match err {
        FrameworkError::Command { error, ctx, .. } => {
            log::warn!(
                "Error when processing \"{}\": {}",
                ctx.command().qualified_name,
                error
            );
        }
        FrameworkError::CommandPanic { payload, ctx, .. } => {
            log::warn!(
                "Panic when processing \"{}\": {}",
                ctx.command().qualified_name,
                payload.clone().unwrap_or("no error message".to_string())
            );
        }
        FrameworkError::ArgumentParse { error, ctx, .. } => {
            log::warn!(
                "Invalid arguments for \"{}\": {}",
                ctx.command().qualified_name,
                error
            );
        }
        FrameworkError::UnknownCommand { .. }
        | FrameworkError::DmOnly { .. }
        | FrameworkError::CooldownHit { .. }
        | FrameworkError::NotAnOwner { .. }
        | FrameworkError::MissingBotPermissions { .. }
        | FrameworkError::MissingUserPermissions { .. }
        | FrameworkError::SubcommandRequired { .. }
        | FrameworkError::GuildOnly { .. }
        | FrameworkError::NsfwOnly { .. }
        | FrameworkError::CommandStructureMismatch { .. }
        | FrameworkError::UnknownInteraction { .. }
        | FrameworkError::CommandCheckFailed { .. } => {}
        _ => {
            log::warn!("Encountered unhandled error: {err:?}");
        }
    }
}
