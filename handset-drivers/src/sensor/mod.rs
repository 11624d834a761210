//! Sensor drivers

pub mod bmi160;

pub use bmi160::{Bmi160, Bmi160Error};
