pub mod cluster;
pub mod config;
pub mod error;
pub mod sources;
