use chrono::{DateTime, Utc};
use serenity::all::UserId;

use crate::{
    features::guard::{Policy, RolePolicy},
    models::content::{Catalogue, CATALOGUE},
};

/// Shared, read-only state handed to every command.
#[derive(Debug)]
pub struct Data {
    pub(crate) catalogue: &'static Catalogue,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) bot_id: UserId,
    pub(crate) policy: Box<dyn Policy>,
}

impl Data {
    pub fn new(bot_id: UserId, started_at: DateTime<Utc>) -> Self {
        Data {
            catalogue: &CATALOGUE,
            started_at,
            bot_id,
            policy: Box::new(RolePolicy),
        }
    }
}
