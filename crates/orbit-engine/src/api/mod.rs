pub mod action;
pub mod config;
pub mod setup;
pub mod types;
