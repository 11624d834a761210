//! Analog stick on two ADC channels

use embassy_rp::adc::{Adc, Async, Channel};
use handset_core::config::StickReading;
use handset_core::traits::Joystick;

/// Two-axis stick sampled with the async ADC
///
/// A failed conversion keeps the previous value for that axis.
pub struct AdcJoystick<'d> {
    adc: Adc<'d, Async>,
    x: Channel<'d>,
    y: Channel<'d>,
    last: StickReading,
}

impl<'d> AdcJoystick<'d> {
    /// `rest` is the reading reported until the first conversion succeeds
    pub fn new(adc: Adc<'d, Async>, x: Channel<'d>, y: Channel<'d>, rest: StickReading) -> Self {
        Self { adc, x, y, last: rest }
    }
}

impl Joystick for AdcJoystick<'_> {
    async fn read(&mut self) -> StickReading {
        if let Ok(x) = self.adc.read(&mut self.x).await {
            self.last.x = x;
        }
        if let Ok(y) = self.adc.read(&mut self.y).await {
            self.last.y = y;
        }
        self.last
    }
}
