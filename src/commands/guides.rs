use crate::{
    models::{content::TutorialOption, invocation::Command},
    Context, Error,
};

use super::run;

/// Get tutorials on how to beam
#[poise::command(slash_command, category = "Guides")]
pub async fn tutorials(
    cx: Context<'_>,
    #[description = "Choose a tutorial type"] option: TutorialOption,
) -> Result<(), Error> {
    run(cx, Command::Tutorials(option)).await
}

/// Get the main method guide
#[poise::command(slash_command, category = "Guides")]
pub async fn method(cx: Context<'_>) -> Result<(), Error> {
    run(cx, Command::Method).await
}
