// Domain layer - Plain data shared by the controllers
pub mod credential;
pub mod dashboard;
pub mod dataset;
