// Presentation layer - HTTP routing and JSON contracts
pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod router;
