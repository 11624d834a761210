//! Frogger-style game
//!
//! The engine is pure: each tick consumes one stick gesture and produces a
//! list of rectangles to repaint. Only regions that changed are listed, so
//! the app loop holds the display lock for a handful of fills per tick.

pub mod engine;
pub mod entity;
pub mod frog;
pub mod lanes;
pub mod paint;
pub mod pool;

pub use engine::{GameEngine, Outcome};
pub use entity::{Entity, EntityKind};
pub use frog::Frog;
pub use lanes::{Lane, LANES};
pub use paint::{Paint, PaintList};
pub use pool::{EntityPool, Handle};

use handset_display::Color;

/// Size of one grid cell in pixels
pub const GRID: i32 = 20;

/// Number of lanes, top to bottom
pub const LANE_COUNT: u8 = 11;

/// Playfield width
pub const GAME_WIDTH: i32 = 240;

/// Playfield height; the strip below it is plain grass
pub const GAME_HEIGHT: i32 = LANE_COUNT as i32 * GRID;

/// Entity arena size
pub const MAX_ENTITIES: usize = 30;

/// Area flashed on a win or a death
pub const FLASH_AREA: handset_display::Rect = handset_display::Rect::new(0, 0, 240, 240);

/// Game palette
pub mod palette {
    use super::Color;

    pub const GRASS: Color = Color(0x2660);
    pub const WATER: Color = Color(0x001F);
    pub const ROAD: Color = Color(0x39E7);
    pub const LOG: Color = Color(0xA145);
    pub const CAR_YELLOW: Color = Color(0xE7E0);
    pub const CAR_BLUE: Color = Color(0x001F);
    pub const FROG: Color = Color::GREEN;
    pub const DEATH: Color = Color::RED;
    pub const WIN: Color = Color::WHITE;
}
