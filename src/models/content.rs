use std::str::FromStr;

use lazy_static::lazy_static;
use poise::{SlashArgError, SlashArgument};
use serenity::{
    all::{CommandInteraction, CommandOptionType, Context, CreateCommandOption, ResolvedValue},
    async_trait,
};

use super::embed::{Embed, HAPPY_BEAMING};

const VERIFIED: &str = "<:Verified:1429128618801365113>";
const IMAGE_GUIDE: &str = "https://cdn.discordapp.com/attachments/1429052404405370880/1429053384417218752/image.png?ex=68f7602d&is=68f60ead&hm=a2cad2c738c81ccd83bd5c132c4055be921dd272e81f2db954e1955fd92701a7&";
const EXTRA_TOOLS: &str =
    "[Test Hyperlink Tool](https://omegabeam-hyperlink.netlify.app/)\n[Main Website](https://shorturl.at/jiifG)";

lazy_static! {
    pub static ref CATALOGUE: Catalogue = Catalogue::load();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TutorialOption {
    Private,
    Youtube,
    Dual,
}

impl TutorialOption {
    pub const ALL: [TutorialOption; 3] = [Self::Private, Self::Youtube, Self::Dual];

    /// Value sent over the wire when the option is picked.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Youtube => "yt",
            Self::Dual => "dual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Private => "Private Server Tut",
            Self::Youtube => "YouTube Tutorial",
            Self::Dual => "Dual Hook Method",
        }
    }
}

impl FromStr for TutorialOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.key() == s)
            .ok_or_else(|| format!("Unknown tutorial option: {}", s))
    }
}

// choice values are the keys, not indices
#[async_trait]
impl SlashArgument for TutorialOption {
    async fn extract(
        _: &Context,
        _: &CommandInteraction,
        value: &ResolvedValue<'_>,
    ) -> Result<Self, SlashArgError> {
        match value {
            ResolvedValue::String(x) => x.parse().map_err(|_| {
                SlashArgError::new_command_structure_mismatch("unknown tutorial option")
            }),
            _ => Err(SlashArgError::new_command_structure_mismatch(
                "expected a string",
            )),
        }
    }

    fn create(builder: CreateCommandOption) -> CreateCommandOption {
        Self::ALL.into_iter().fold(
            builder.kind(CommandOptionType::String),
            |builder, option| builder.add_string_choice(option.label(), option.key()),
        )
    }
}

/// Every piece of static content the bot can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKey {
    Tutorial(TutorialOption),
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub command: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
}

/// Read-only pages keyed by [`ContentKey`]. Built once, shared by every invocation.
#[derive(Debug)]
pub struct Catalogue {
    private_tutorial: Vec<Embed>,
    youtube_tutorial: Vec<Embed>,
    dual_hook: Vec<Embed>,
    method: Vec<Embed>,
    help: Vec<HelpEntry>,
}

impl Catalogue {
    pub fn load() -> Self {
        Catalogue {
            private_tutorial: private_tutorial(),
            youtube_tutorial: vec![Embed::new(format!("Tutorials {VERIFIED}"))
                .field(
                    "YouTube Tutorial",
                    format!("[Watch the video tutorial here]({IMAGE_GUIDE})"),
                    false,
                )
                .footer(HAPPY_BEAMING)],
            dual_hook: vec![dual_hook()],
            method: vec![Embed::new(format!("Main Method {VERIFIED}"))
                .description(
                    "[Read the full guide here](https://ptb.discord.com/channels/1406868498772398091/1428791488866947132)\n\n\
                     Don't be lazy, start reading!",
                )
                .field("Extra Tools", EXTRA_TOOLS, false)
                .footer(HAPPY_BEAMING)],
            help: help_entries(),
        }
    }

    /// Pages in send order. Never empty.
    pub fn pages(&self, key: ContentKey) -> &[Embed] {
        match key {
            ContentKey::Tutorial(TutorialOption::Private) => &self.private_tutorial,
            ContentKey::Tutorial(TutorialOption::Youtube) => &self.youtube_tutorial,
            ContentKey::Tutorial(TutorialOption::Dual) => &self.dual_hook,
            ContentKey::Method => &self.method,
        }
    }

    pub fn help(&self) -> &[HelpEntry] {
        &self.help
    }
}

fn private_tutorial() -> Vec<Embed> {
    vec![
        Embed::new(format!("{VERIFIED} Private Server Tutorial (1/3)"))
            .description("**Text-based guide:**")
            .field(
                "1. Go to our page",
                "Go to our page on https://ptb.discord.com/channels/1406868498772398091/1428706207736270912",
                false,
            )
            .field(
                "2. Log in",
                "Log in with your discord account (only asks for username)",
                false,
            )
            .field(
                "3. Configuration",
                "Go to the icon of configuration and use robiox.tg domain",
                false,
            )
            .field(
                "4. Games section",
                "Go to the button that says \"Games\" and click on it",
                false,
            )
            .field(
                "5. Select game",
                "Select the game u want, click it and then click the button that says copy url",
                false,
            ),
        Embed::new(format!("{VERIFIED} Private Server Tutorial (2/3)"))
            .description("**Continued:**")
            .field(
                "6. Shorten URL",
                "Once you have it go to [tinyurl.com](https://tinyurl.com) and paste the link that you copied before",
                false,
            )
            .field(
                "7. Follow image guide",
                "Now do what I show in the image below",
                false,
            )
            .field(
                "8. Image Reference",
                format!("[View Image]({IMAGE_GUIDE})"),
                false,
            )
            .image(IMAGE_GUIDE),
        Embed::new(format!("{VERIFIED} Private Server Tutorial (3/3)"))
            .description("**Final Steps:**")
            .field(
                "9. Final Input",
                format!(
                    "Type what I show in the image and then replace \"https://tinyurl.com/\" with your link\n\n{EXTRA_TOOLS}"
                ),
                false,
            )
            .footer(format!("Thats it! {HAPPY_BEAMING}")),
    ]
}

fn dual_hook() -> Embed {
    Embed::new(format!("Tutorials {VERIFIED}"))
        .field(
            "Step 1: Create Beam Server",
            "Create a Beam server where you teach members how to beam. At the same time, you'll be stealing their beams.",
            false,
        )
        .field(
            "Step 2: Use Template",
            "Create a server using the template below. You can perform a reset.",
            false,
        )
        .field(
            "Step 3: Advertise",
            "Once you're done with your entire server, try to associate with as many beam servers as you can, \
             invite your friends, and even secretly steal members from different beam servers. \
             FOR GOOD AND QUICK ADVERTISING YOU CAN MAKE A YOUTUBE VIDEO!",
            false,
        )
        .field(
            "Server Template",
            "[Create Template :D](https://discord.new/Cg2G6AdH6ZkR)",
            false,
        )
        .footer(HAPPY_BEAMING)
}

fn help_entries() -> Vec<HelpEntry> {
    [
        (
            "tutorials",
            "Get tutorials on how to beam",
            "Use `/tutorials <option: private|yt|dual>` to get beaming tutorials.",
        ),
        (
            "method",
            "Get the main method guide",
            "Use `/method` to get the main beaming guide.",
        ),
        (
            "ban",
            "Ban a user",
            "Use `/ban <user> [reason]` to ban a user. Requires Moderator role or Ban Members permission.",
        ),
        (
            "kick",
            "Kick a user",
            "Use `/kick <user> [reason]` to kick a user. Requires Moderator role or Kick Members permission.",
        ),
        (
            "mute",
            "Mute a user",
            "Use `/mute <user> <duration_minutes> [reason]` to mute a user. Requires Moderator role or Moderate Members permission.",
        ),
        (
            "unmute",
            "Unmute a user",
            "Use `/unmute <user>` to unmute a user. Requires Moderator role or Moderate Members permission.",
        ),
        (
            "clear",
            "Clear messages",
            "Use `/clear <amount: 1-100>` to delete messages. Requires Moderator role or Manage Messages permission.",
        ),
        (
            "lock",
            "Lock a channel",
            "Use `/lock [channel]` to lock a channel. Defaults to current channel. Requires Moderator role or Manage Channels permission.",
        ),
        (
            "unlock",
            "Unlock a channel",
            "Use `/unlock [channel]` to unlock a channel. Defaults to current channel. Requires Moderator role or Manage Channels permission.",
        ),
        (
            "role",
            "Assign a role",
            "Use `/role <user> <role>` to assign a role. Requires Moderator role or Manage Roles permission.",
        ),
        (
            "audit",
            "View audit logs",
            "Use `/audit [limit]` to view recent audit logs. Defaults to 10 entries. Requires Moderator role or View Audit Log permission.",
        ),
        (
            "say",
            "Bot says message",
            "Use `/say <message>` to make the bot send a message. Requires Moderator role or Manage Messages permission.",
        ),
        (
            "getserver info",
            "Get server info",
            "Use `/getserver info` to see server details like member count.",
        ),
        (
            "getserver icon",
            "Get server icon",
            "Use `/getserver icon` to get the server's icon.",
        ),
        (
            "dice",
            "Roll a dice",
            "Use `/dice [sides]` to roll a die. Defaults to 6 sides. Example: `/dice 20`.",
        ),
        (
            "coin",
            "Flip a coin",
            "Use `/coin` to flip a coin (Heads or Tails).",
        ),
        (
            "usage",
            "Detailed command usage",
            "Use `/usage [command]` for detailed command usage. Example: `/usage ping`.",
        ),
        (
            "uptime",
            "Check bot uptime",
            "Use `/uptime` to see how long the bot has been running.",
        ),
        (
            "ping",
            "Check if bot is alive",
            "Use `/ping` to check bot responsiveness.",
        ),
        (
            "help",
            "List all commands",
            "Use `/help` to see all available commands.",
        ),
        (
            "invite",
            "Get bot invite link",
            "Use `/invite` to get a link to add the bot to your server.",
        ),
    ]
    .into_iter()
    .map(|(command, description, usage)| HelpEntry {
        command,
        description,
        usage,
    })
    .collect()
}
