//! CLI command handlers.

pub mod boot;
pub mod config;
pub mod links;
pub mod menu;
