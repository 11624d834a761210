//! Lane table

use handset_display::{Color, Rect};

use super::{palette, GAME_WIDTH, GRID, LANE_COUNT};

/// Lane surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lane {
    /// Safe ground
    Grass,
    /// Drowns the frog unless it rides a platform
    Water,
    /// Cars drive here
    Road,
}

/// Lanes from the goal (0) down to the start (10)
pub const LANES: [Lane; LANE_COUNT as usize] = [
    Lane::Grass,
    Lane::Water,
    Lane::Water,
    Lane::Water,
    Lane::Water,
    Lane::Grass,
    Lane::Road,
    Lane::Road,
    Lane::Road,
    Lane::Road,
    Lane::Grass,
];

/// Goal lane
pub const GOAL_LANE: u8 = 0;

/// Lane the frog starts in
pub const START_LANE: u8 = LANE_COUNT - 1;

impl Lane {
    /// Lane at an index; out-of-range lanes read as grass
    pub fn at(lane: u8) -> Lane {
        LANES.get(lane as usize).copied().unwrap_or(Lane::Grass)
    }

    pub fn color(self) -> Color {
        match self {
            Lane::Grass => palette::GRASS,
            Lane::Water => palette::WATER,
            Lane::Road => palette::ROAD,
        }
    }
}

/// Top pixel row of a lane
pub const fn lane_y(lane: u8) -> i32 {
    lane as i32 * GRID
}

/// Full-width strip of a lane
pub const fn lane_rect(lane: u8) -> Rect {
    Rect::new(0, lane_y(lane), GAME_WIDTH, GRID)
}

/// Background color behind a lane
pub fn lane_color(lane: u8) -> Color {
    Lane::at(lane).color()
}
