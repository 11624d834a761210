//! Board-agnostic core logic for the handset firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (stick, buttons, magnetometer)
//! - App lifecycle state machine and launcher cursor
//! - Companion link client
//! - Shared context with the display and bus locks
//! - Launcher, lock screen and app loops
//! - Frogger engine with dirty-region repaints
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod apps;
pub mod config;
pub mod context;
pub mod game;
pub mod launcher;
pub mod link;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use config::HandsetConfig;
pub use context::{ButtonIrq, Handset, SharedBus};
pub use link::{CompanionLink, LinkError};
pub use state::{AppId, AppState, Event};
