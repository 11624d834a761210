//! Cars and logs

use handset_display::{Color, Rect};

use super::lanes::{lane_color, lane_y};
use super::paint::PaintList;
use super::{GAME_WIDTH, GRID};

/// What touching the entity does to the frog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntityKind {
    /// Car: kills on contact
    Obstacle,
    /// Log: carries the frog across water
    Platform,
}

/// A moving lane occupant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Entity {
    /// Exact left edge
    pub x: f32,
    /// Left edge as last painted
    pub drawn_x: i32,
    pub lane: u8,
    /// Pixels per tick; negative moves left
    pub speed: f32,
    pub width: i32,
    pub color: Color,
    pub kind: EntityKind,
}

/// Result of advancing one entity by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Still on its way
    Alive,
    /// Strictly past the far edge; free the slot
    Culled,
}

impl Entity {
    /// Create an entity entering from the edge its lane direction implies
    ///
    /// Even lanes move left from `x = 240`, odd lanes move right from
    /// `x = -width`. `speed` is the magnitude.
    pub fn entering(lane: u8, width: i32, speed: f32, color: Color, kind: EntityKind) -> Self {
        let (x, speed) = if lane % 2 == 0 {
            (GAME_WIDTH as f32, -speed)
        } else {
            (-(width as f32), speed)
        };
        Self {
            x,
            drawn_x: pixel(x),
            lane,
            speed,
            width,
            color,
            kind,
        }
    }

    pub fn y(&self) -> i32 {
        lane_y(self.lane)
    }

    /// Rectangle as currently painted
    pub fn drawn_rect(&self) -> Rect {
        Rect::new(self.drawn_x, self.y(), self.width, GRID)
    }

    /// Strictly past the far edge for its direction of travel
    pub fn is_past_edge(&self) -> bool {
        if self.speed > 0.0 {
            self.x > GAME_WIDTH as f32
        } else {
            self.x + (self.width as f32) < 0.0
        }
    }

    /// Move by one tick and queue the repaints it needs
    ///
    /// A live entity repaints only the strips its integer position uncovered
    /// and covered; a culled one erases what it last painted.
    pub fn advance(&mut self, paints: &mut PaintList) -> Advance {
        self.x += self.speed;
        let background = lane_color(self.lane);

        if self.is_past_edge() {
            paints.fill(self.drawn_rect(), background);
            return Advance::Culled;
        }

        let new_x = pixel(self.x);
        if new_x != self.drawn_x {
            let delta = self.drawn_rect().horizontal_delta(new_x);
            if let Some(vacated) = delta.vacated {
                paints.fill(vacated, background);
            }
            if let Some(exposed) = delta.exposed {
                paints.fill(exposed, self.color);
            }
            self.drawn_x = new_x;
        }
        Advance::Alive
    }
}

/// Pixel column for an exact position
pub fn pixel(x: f32) -> i32 {
    libm::floorf(x) as i32
}
