use serenity::all::{CreateEmbed, CreateEmbedFooter};

use crate::models::embed::Embed;

impl From<Embed> for CreateEmbed {
    fn from(value: Embed) -> Self {
        let mut embed = CreateEmbed::new()
            .title(value.title)
            .color(value.colour)
            .fields(
                value
                    .fields
                    .into_iter()
                    .map(|x| (x.name, x.value, x.inline)),
            );
        if let Some(description) = value.description {
            embed = embed.description(description);
        }
        if let Some(image) = value.image {
            embed = embed.image(image);
        }
        if let Some(thumbnail) = value.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }
        if let Some(footer) = value.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        embed
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::models::embed::HAPPY_BEAMING;

    fn serialize(embed: Embed) -> Value {
        serde_json::to_value(CreateEmbed::from(embed)).unwrap()
    }

    #[test]
    fn test_embed_carries_every_part() {
        let json = serialize(
            Embed::new("Title")
                .description("Body")
                .field("Step", "Do it", false)
                .field("Other", "Too", true)
                .image("https://example.com/guide.png")
                .thumbnail("https://example.com/icon.png")
                .footer(HAPPY_BEAMING),
        );
        assert_eq!(json["title"], "Title");
        assert_eq!(json["description"], "Body");
        assert_eq!(json["fields"][0]["name"], "Step");
        assert_eq!(json["fields"][0]["value"], "Do it");
        assert_eq!(json["fields"][0]["inline"], false);
        assert_eq!(json["fields"][1]["inline"], true);
        assert_eq!(json["image"]["url"], "https://example.com/guide.png");
        assert_eq!(json["thumbnail"]["url"], "https://example.com/icon.png");
        assert_eq!(json["footer"]["text"], "HAPPY BEAMING!");
    }

    #[test]
    fn test_missing_parts_are_left_out() {
        let json = serialize(Embed::new("Bare"));
        assert_eq!(json["title"], "Bare");
        assert!(json.get("description").is_none());
        assert!(json.get("image").is_none());
        assert!(json.get("footer").is_none());
    }
}
