//! Runtime configuration
//!
//! handset.toml is compiled into the image and parsed once at boot.
//! build.rs has already validated it, so a parse failure here means the
//! file and the firmware disagree; the defaults are used instead.

pub mod toml;

use defmt::*;
use handset_core::HandsetConfig;

pub use self::toml::{parse_config, ParseError};

/// Embedded configuration, edit handset.toml and rebuild to change it
const EMBEDDED_CONFIG: &str = include_str!("../../handset.toml");

/// Load the embedded configuration
pub fn load() -> HandsetConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration");
            config
        }
        Err(e) => {
            warn!("Embedded config rejected: {}, using defaults", e);
            HandsetConfig::default()
        }
    }
}
