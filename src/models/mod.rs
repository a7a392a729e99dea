pub mod chat;
pub mod ui;
