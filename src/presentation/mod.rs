// Presentation layer - HTTP routes and the browser shell
pub mod app_state;
pub mod handlers;
pub mod page;
pub mod router;
