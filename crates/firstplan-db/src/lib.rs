//! On-disk pace database: file model, location config, and loading.

pub mod config;
pub mod models;
pub mod store;
