//! Heading sensor trait

/// Errors from the heading sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed
    Bus,
    /// Device did not answer with the expected identity
    NotFound,
    /// Auxiliary interface stayed busy
    Timeout,
}

/// Raw magnetometer axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl MagSample {
    /// Compass heading in degrees, `[0, 360)`
    ///
    /// `None` when both horizontal axes read zero.
    pub fn heading_deg(&self) -> Option<f32> {
        if self.x == 0 && self.y == 0 {
            return None;
        }
        let deg = libm::atan2f(self.y as f32, self.x as f32).to_degrees();
        Some(if deg < 0.0 { deg + 360.0 } else { deg })
    }
}

/// Magnetometer that must be brought up each time it is used
///
/// Implementations own their bus handle; callers hold the shared bus lock
/// across every call.
#[allow(async_fn_in_trait)]
pub trait Magnetometer {
    /// Run the bring-up sequence
    async fn power_up(&mut self) -> Result<(), SensorError>;

    /// Read one sample; `Ok(None)` when no fresh data is ready
    async fn read(&mut self) -> Result<Option<MagSample>, SensorError>;

    /// Suspend the sensor
    async fn power_down(&mut self) -> Result<(), SensorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        libm::fabsf(a - b) < 0.01
    }

    #[test]
    fn test_heading_quadrants() {
        let east = MagSample { x: 100, y: 0, z: 0 };
        let north = MagSample { x: 0, y: 100, z: 0 };
        let west = MagSample { x: -100, y: 0, z: 0 };
        let south = MagSample { x: 0, y: -100, z: 0 };

        assert!(close(east.heading_deg().unwrap(), 0.0));
        assert!(close(north.heading_deg().unwrap(), 90.0));
        assert!(close(west.heading_deg().unwrap(), 180.0));
        assert!(close(south.heading_deg().unwrap(), 270.0));
    }

    #[test]
    fn test_heading_not_ready() {
        let zero = MagSample { x: 0, y: 0, z: 55 };
        assert_eq!(zero.heading_deg(), None);
    }
}
