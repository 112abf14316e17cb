//! Shared pieces of linkboot: configuration, the destination catalog, the
//! boot script, logging, and Ctrl+C handling.

pub mod config;
pub mod destinations;
pub mod interrupt;
pub mod logging;
pub mod script;

pub use config::Config;
pub use destinations::{Catalog, Destination, Section};
