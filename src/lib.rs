pub mod ai;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod priority;
pub mod store;
