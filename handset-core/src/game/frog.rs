//! The player

use handset_display::Rect;

use super::entity::{pixel, Entity};
use super::lanes::{lane_y, START_LANE};
use super::{GAME_WIDTH, GRID, LANE_COUNT};
use crate::state::Direction;

/// Left edge at the start, centred on the playfield
pub const START_X: f32 = (GAME_WIDTH / 2 - GRID / 2) as f32;

/// Body inset inside the grid cell
const INSET: i32 = 2;

/// Painted body size
const BODY: i32 = GRID - 2 * INSET;

/// Frog position and move timer; written only by the game loop
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frog {
    pub x: f32,
    pub lane: u8,
    pub prev_x: f32,
    pub prev_lane: u8,
    pub move_cooldown: u8,
}

impl Default for Frog {
    fn default() -> Self {
        Self::new()
    }
}

impl Frog {
    pub const fn new() -> Self {
        Self {
            x: START_X,
            lane: START_LANE,
            prev_x: START_X,
            prev_lane: START_LANE,
            move_cooldown: 0,
        }
    }

    /// Back to the start lane; the cooldown is cleared
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Snapshot the position before this tick's moves
    pub fn remember(&mut self) {
        self.prev_x = self.x;
        self.prev_lane = self.lane;
    }

    /// Apply one stick gesture, honouring the move cooldown
    pub fn steer(&mut self, direction: Option<Direction>, cooldown: u8) {
        if self.move_cooldown > 0 {
            self.move_cooldown -= 1;
            return;
        }
        let Some(direction) = direction else {
            return;
        };

        match direction {
            Direction::Up => self.lane = self.lane.saturating_sub(1),
            Direction::Down => self.lane = self.lane.saturating_add(1),
            Direction::Left => self.x -= GRID as f32,
            Direction::Right => self.x += GRID as f32,
        }
        self.move_cooldown = cooldown;
        self.clamp();
    }

    /// Keep the frog on the playfield
    pub fn clamp(&mut self) {
        let max_x = (GAME_WIDTH - GRID) as f32;
        self.x = self.x.clamp(0.0, max_x);
        self.lane = self.lane.min(LANE_COUNT - 1);
    }

    /// Hit-box overlap with an entity
    ///
    /// The frog's box is `[x+2, x+14) x [y, y+16)`, the entity's
    /// `[x, x+width) x [y+2, y+18)`.
    pub fn overlaps(&self, entity: &Entity) -> bool {
        let fy = lane_y(self.lane) as f32;
        let ey = entity.y() as f32;
        let ex = entity.x;
        let ew = entity.width as f32;

        self.x + 2.0 < ex + ew && self.x + 14.0 > ex && fy < ey + 18.0 && fy + 16.0 > ey + 2.0
    }

    /// Position changed on screen since [`Frog::remember`]
    pub fn moved(&self) -> bool {
        pixel(self.x) != pixel(self.prev_x) || self.lane != self.prev_lane
    }

    /// Grid cell occupied before this tick
    pub fn previous_cell(&self) -> Rect {
        Rect::new(pixel(self.prev_x), lane_y(self.prev_lane), GRID, GRID)
    }

    /// Painted body
    pub fn body(&self) -> Rect {
        Rect::new(pixel(self.x) + INSET, lane_y(self.lane) + INSET, BODY, BODY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{palette, EntityKind};

    fn car(lane: u8, x: f32, width: i32) -> Entity {
        let mut e = Entity::entering(lane, width, 1.0, palette::CAR_BLUE, EntityKind::Obstacle);
        e.x = x;
        e.drawn_x = pixel(x);
        e
    }

    #[test]
    fn test_start_position() {
        let frog = Frog::new();
        assert_eq!(frog.x, 110.0);
        assert_eq!(frog.lane, 10);
        assert_eq!(frog.body(), Rect::new(112, 202, 16, 16));
    }

    #[test]
    fn test_cooldown_blocks_moves() {
        let mut frog = Frog::new();
        frog.steer(Some(Direction::Up), 4);
        assert_eq!(frog.lane, 9);
        for _ in 0..4 {
            frog.steer(Some(Direction::Up), 4);
            assert_eq!(frog.lane, 9);
        }
        frog.steer(Some(Direction::Up), 4);
        assert_eq!(frog.lane, 8);
    }

    #[test]
    fn test_clamped_to_playfield() {
        let mut frog = Frog::new();
        frog.steer(Some(Direction::Down), 0);
        assert_eq!(frog.lane, 10);

        frog.x = 0.0;
        frog.steer(Some(Direction::Left), 0);
        assert_eq!(frog.x, 0.0);

        frog.x = 220.0;
        frog.steer(Some(Direction::Right), 0);
        assert_eq!(frog.x, 220.0);
    }

    #[test]
    fn test_overlap_same_lane_only() {
        let mut frog = Frog::new();
        frog.lane = 7;
        assert!(frog.overlaps(&car(7, 100.0, 40)));
        assert!(!frog.overlaps(&car(6, 100.0, 40)));
        assert!(!frog.overlaps(&car(8, 100.0, 40)));
    }

    #[test]
    fn test_overlap_horizontal_tolerance() {
        let mut frog = Frog::new();
        frog.lane = 7;
        frog.x = 100.0;
        // Entity ends at 102: touches the frog's cell but not its hit box
        assert!(!frog.overlaps(&car(7, 62.0, 40)));
        assert!(frog.overlaps(&car(7, 62.5, 40)));
        // Entity starts at 114: same
        assert!(!frog.overlaps(&car(7, 114.0, 40)));
        assert!(frog.overlaps(&car(7, 113.5, 40)));
    }
}
