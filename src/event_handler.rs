use serenity::{
    all::{ActivityData, Context, EventHandler, OnlineStatus, Ready},
    async_trait,
};

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, cx: Context, ready: Ready) {
        log::info!("{} is connected!", ready.user.name);
        cx.set_presence(
            Some(ActivityData::watching("/tutorials")),
            OnlineStatus::Online,
        );
    }
}
