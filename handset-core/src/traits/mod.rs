//! Hardware abstraction traits
//!
//! These traits define the interface between the app loops and the board
//! support code. The display is reached through `handset_display::Canvas`,
//! the companion link through `embedded_io_async`.

pub mod input;
pub mod sensor;

pub use input::{ButtonPad, Joystick};
pub use sensor::{MagSample, Magnetometer, SensorError};
