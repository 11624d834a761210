//! Stick and button traits

use crate::config::StickReading;

/// Two-axis analog stick
#[allow(async_fn_in_trait)]
pub trait Joystick {
    /// Sample both channels (12-bit, 0-4095)
    async fn read(&mut self) -> StickReading;
}

/// Button bank read as a bitmask
///
/// Bit values follow `state::buttons`; a set bit means pressed.
pub trait ButtonPad {
    fn read_mask(&mut self) -> u8;
}
