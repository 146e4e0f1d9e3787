// Application layer - Session and data-synchronization controllers
pub mod auth_controller;
pub mod dashboard_sync;
pub mod errors;
pub mod fetch;
pub mod report_downloader;
pub mod token_store;
