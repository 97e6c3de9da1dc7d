pub mod content;
pub mod embed;
pub mod guild;
pub mod invocation;
pub mod moderation;
