//! RP2040-specific input glue for the handset firmware
//!
//! This crate provides RP2040 implementations of the core input traits:
//! - Analog stick on two ADC channels
//! - Button lines with edge watching and a latched mask
//! - Board pin assignment

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod joystick;
pub mod pins;

pub use buttons::{ButtonLatch, ButtonLines, LatchReader};
pub use joystick::AdcJoystick;
