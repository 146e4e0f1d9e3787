// Presentation layer - CLI surface and stateless rendering
pub mod app_state;
pub mod cli;
pub mod handlers;
pub mod render;
