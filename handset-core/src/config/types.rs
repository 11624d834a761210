//! Configuration type definitions

use handset_protocol::PixelOrder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::Direction;

/// Complete runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HandsetConfig {
    pub timing: TimingConfig,
    pub stick: StickConfig,
    pub game: GameRules,
    pub link: LinkConfig,
}

/// Loop cadences and refresh intervals
///
/// Periods are milliseconds; intervals count loop iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Launcher loop period
    pub launcher_ms: u32,
    /// Lock screen loop period
    pub lock_ms: u32,
    /// Camera idle loop period
    pub camera_ms: u32,
    /// Compass poll period
    pub compass_ms: u32,
    /// Weather loop period
    pub weather_ms: u32,
    /// Game tick
    pub game_tick_ms: u32,
    /// Input task back-off after each batch of button edges
    pub input_ms: u32,
    /// Lock screen iterations between clock fetches
    pub clock_refresh_ticks: u32,
    /// Lock screen iteration at which the lock message is drawn
    pub lock_message_tick: u32,
    /// Compass polls between location fetches
    pub location_refresh_polls: u32,
    /// Weather iterations between fetches
    pub weather_refresh_polls: u32,
    /// Launcher iterations ignored after an accepted stick gesture
    pub launcher_cooldown: u8,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            launcher_ms: 150,
            lock_ms: 50,
            camera_ms: 50,
            compass_ms: 100,
            weather_ms: 100,
            game_tick_ms: 60,
            input_ms: 50,
            clock_refresh_ticks: 50,
            lock_message_tick: 10,
            location_refresh_polls: 20,
            weather_refresh_polls: 50,
            launcher_cooldown: 1,
        }
    }
}

/// Analog stick calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StickConfig {
    /// Raw reading at rest (12-bit ADC)
    pub center: u16,
    /// Offset from centre a reading must exceed to count as a gesture
    pub dead_zone: u16,
    /// Exchange the X and Y channels
    pub swap_axes: bool,
    /// Larger raw X means left instead of right
    pub invert_x: bool,
    /// Larger raw Y means down instead of up
    pub invert_y: bool,
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            center: 2048,
            dead_zone: 1000,
            swap_axes: false,
            invert_x: false,
            invert_y: false,
        }
    }
}

/// One raw stick sample, both channels 0-4095
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickReading {
    pub x: u16,
    pub y: u16,
}

impl StickReading {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl StickConfig {
    /// Stick at rest
    pub fn centered(&self) -> StickReading {
        StickReading::new(self.center, self.center)
    }

    /// Resolve a sample to one gesture along the dominant axis
    ///
    /// Each axis must leave the dead zone to count. When both do, the larger
    /// deflection wins and vertical wins ties.
    pub fn direction(&self, reading: StickReading) -> Option<Direction> {
        let (raw_x, raw_y) = if self.swap_axes {
            (reading.y, reading.x)
        } else {
            (reading.x, reading.y)
        };

        let mut dx = raw_x as i32 - self.center as i32;
        let mut dy = raw_y as i32 - self.center as i32;
        if self.invert_x {
            dx = -dx;
        }
        if self.invert_y {
            dy = -dy;
        }

        let dead = self.dead_zone as i32;
        let horizontal = dx.abs() > dead;
        let vertical = dy.abs() > dead;

        match (horizontal, vertical) {
            (false, false) => None,
            (true, true) if dx.abs() > dy.abs() => Some(Self::horizontal(dx)),
            (true, false) => Some(Self::horizontal(dx)),
            _ => Some(if dy > 0 { Direction::Up } else { Direction::Down }),
        }
    }

    fn horizontal(dx: i32) -> Direction {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// Game tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameRules {
    /// RNG seed, fixed per session
    pub seed: u64,
    /// Ticks between spawn attempts
    pub spawn_interval: u32,
    /// Ticks the frog must wait between moves
    pub move_cooldown: u8,
    /// Flash duration after a win or a death
    pub outcome_pause_ms: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            seed: 4745,
            spawn_interval: 25,
            move_cooldown: 4,
            outcome_pause_ms: 200,
        }
    }
}

/// Companion link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Serial baud rate
    pub baud: u32,
    /// Byte order of photo pixels
    #[cfg_attr(feature = "serde", serde(with = "pixel_order"))]
    pub pixel_order: PixelOrder,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud: 460_800,
            // Documented wire order; the stock companion script sends
            // high byte first and is configured in handset.toml
            pixel_order: PixelOrder::LowFirst,
        }
    }
}

/// `PixelOrder` as the strings `"low_first"` / `"high_first"`
#[cfg(feature = "serde")]
mod pixel_order {
    use handset_protocol::PixelOrder;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(order: &PixelOrder, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(match order {
            PixelOrder::LowFirst => "low_first",
            PixelOrder::HighFirst => "high_first",
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PixelOrder, D::Error> {
        d.deserialize_str(OrderVisitor)
    }

    struct OrderVisitor;

    impl Visitor<'_> for OrderVisitor {
        type Value = PixelOrder;

        fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
            f.write_str("\"low_first\" or \"high_first\"")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<PixelOrder, E> {
            match v {
                "low_first" => Ok(PixelOrder::LowFirst),
                "high_first" => Ok(PixelOrder::HighFirst),
                other => Err(E::unknown_variant(other, &["low_first", "high_first"])),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cadences() {
        let t = TimingConfig::default();
        assert_eq!(t.launcher_ms, 150);
        assert_eq!(t.game_tick_ms, 60);
        assert_eq!(t.clock_refresh_ticks, 50);
        assert_eq!(GameRules::default().seed, 4745);
        assert_eq!(LinkConfig::default().baud, 460_800);
    }

    #[test]
    fn test_dead_zone() {
        let stick = StickConfig::default();
        assert_eq!(stick.direction(stick.centered()), None);
        // Exactly on the edge is still inside
        assert_eq!(stick.direction(StickReading::new(3048, 2048)), None);
        assert_eq!(
            stick.direction(StickReading::new(3049, 2048)),
            Some(Direction::Right)
        );
        assert_eq!(
            stick.direction(StickReading::new(2048, 0)),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_dominant_axis() {
        let stick = StickConfig::default();
        assert_eq!(
            stick.direction(StickReading::new(4095, 3500)),
            Some(Direction::Right)
        );
        assert_eq!(
            stick.direction(StickReading::new(3500, 4095)),
            Some(Direction::Up)
        );
        // Tie goes to the vertical axis
        assert_eq!(
            stick.direction(StickReading::new(4000, 4000)),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_swap_and_invert() {
        let stick = StickConfig {
            swap_axes: true,
            invert_y: true,
            ..StickConfig::default()
        };
        // Raw X now drives the vertical axis, inverted
        assert_eq!(
            stick.direction(StickReading::new(4095, 2048)),
            Some(Direction::Down)
        );
        assert_eq!(
            stick.direction(StickReading::new(2048, 0)),
            Some(Direction::Left)
        );
    }
}
