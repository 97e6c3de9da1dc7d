pub mod guard;
pub mod info;
pub mod moderation;
pub mod router;
