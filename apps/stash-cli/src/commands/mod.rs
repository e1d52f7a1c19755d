pub mod chat;
pub mod goals;
