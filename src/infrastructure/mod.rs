// Infrastructure layer - External dependencies and adapters
pub mod api_client;
pub mod config;
#[cfg(test)]
pub mod fake_transport;
pub mod report_sink;
pub mod reqwest_transport;
pub mod token_store;
