pub mod auth;
pub mod config;
pub mod scores;
pub mod sessions;
pub mod stats;
pub mod timer;
