//! Lock screen, launcher and app loops
//!
//! The home task runs the lock screen, then the launcher; apps run inline
//! on the home task and return once the lifecycle leaves their state. Every
//! loop takes the locks it needs for one iteration only and checks the
//! lifecycle at the top of each iteration.
//!
//! Errors from the link, the panel or the sensor are logged and the loop
//! carries on with the next iteration.

pub mod camera;
pub mod compass;
pub mod game;
pub mod home;
pub mod input;
pub mod weather;

use handset_display::DisplayError;

use crate::link::LinkError;
use crate::traits::SensorError;

/// Failure inside one app iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppError {
    Link(LinkError),
    Display(DisplayError),
    Sensor(SensorError),
}

impl From<LinkError> for AppError {
    fn from(e: LinkError) -> Self {
        AppError::Link(e)
    }
}

impl From<DisplayError> for AppError {
    fn from(e: DisplayError) -> Self {
        AppError::Display(e)
    }
}

impl From<SensorError> for AppError {
    fn from(e: SensorError) -> Self {
        AppError::Sensor(e)
    }
}

/// Log a failed iteration and keep going
pub(crate) fn report(app: &str, result: Result<(), AppError>) {
    if let Err(e) = result {
        warn!("{}: {}", app, e);
    }
}
