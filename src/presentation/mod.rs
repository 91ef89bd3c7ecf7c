// Presentation layer - HTTP surface over the boards
pub mod app_state;
pub mod handlers;
