//! Per-screen state, input handling, and drawing.

pub mod boot;
pub mod connecting;
pub mod lightning;
pub mod menu;
pub mod rain;
