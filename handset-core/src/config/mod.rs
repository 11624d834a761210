//! Configuration types
//!
//! Board-agnostic tuning values. The firmware fills these from an embedded
//! TOML file; `Default` gives the stock behaviour.

pub mod types;

pub use types::*;
