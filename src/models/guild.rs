use serenity::all::GuildId;

/// What `/getserver` shows about the current guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildOverview {
    pub id: GuildId,
    pub name: String,
    pub member_count: u64,
    pub channel_count: usize,
    /// Excludes `@everyone`.
    pub role_count: usize,
    pub created_at: i64,
    pub icon_url: Option<String>,
}
