use serenity::all::Colour;

pub const BEAM_GREEN: Colour = Colour::new(0x00ff00);
pub const ALERT_RED: Colour = Colour::new(0xff0000);

/// Footer carried by most informational embeds.
pub const HAPPY_BEAMING: &str = "HAPPY BEAMING!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-neutral rich message, converted into a serenity `CreateEmbed`
/// right before it leaves the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub colour: Colour,
    pub fields: Vec<EmbedField>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
}

impl Embed {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Embed {
            title: title.into(),
            description: None,
            colour: BEAM_GREEN,
            fields: vec![],
            image: None,
            thumbnail: None,
            footer: None,
        }
    }

    pub fn description<T: Into<String>>(mut self, description: T) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    pub fn field<N: Into<String>, V: Into<String>>(mut self, name: N, value: V, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn image<T: Into<String>>(mut self, url: T) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn thumbnail<T: Into<String>>(mut self, url: T) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn footer<T: Into<String>>(mut self, text: T) -> Self {
        self.footer = Some(text.into());
        self
    }
}

/// A single outbound message: optional text, optional embed and its visibility.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub ephemeral: bool,
}

impl Reply {
    /// Embed visible to the whole channel.
    pub fn public(embed: Embed) -> Self {
        Reply {
            embed: Some(embed),
            ..Default::default()
        }
    }

    /// Plain text only the invoker can see.
    pub fn private<T: Into<String>>(content: T) -> Self {
        Reply {
            content: Some(content.into()),
            ephemeral: true,
            ..Default::default()
        }
    }

    pub fn private_embed(embed: Embed) -> Self {
        Reply {
            embed: Some(embed),
            ephemeral: true,
            ..Default::default()
        }
    }
}
