//! Launcher screen: 2x2 icon grid with a selection frame

pub mod icons;

use handset_display::{Canvas, CanvasExt, Color, DisplayError, Point, Rect, TextStyle};

use crate::config::{StickConfig, StickReading};
use crate::state::Selection;

/// Left edge of the first icon column
pub const START_X: i32 = 30;
/// Top edge of the first icon row
pub const START_Y: i32 = 50;
/// Icon box size
pub const BOX: i32 = 80;
/// Gap between icons
pub const GAP: i32 = 30;
/// Selection frame thickness
pub const FRAME: i32 = 2;

pub const BACKGROUND: Color = Color::BLACK;
pub const SELECT_COLOR: Color = Color::RED;

const TITLE: &str = "HOME MENU";

/// Icon box for a grid position
pub fn icon_rect(selection: Selection) -> Rect {
    Rect::new(
        START_X + selection.column() as i32 * (BOX + GAP),
        START_Y + selection.row() as i32 * (BOX + GAP),
        BOX,
        BOX,
    )
}

/// Icon box plus its selection frame
pub fn cell_rect(selection: Selection) -> Rect {
    icon_rect(selection).inflate(FRAME)
}

/// Full redraw: title, every icon with its label, and the cursor
pub fn draw_home<C: Canvas + ?Sized>(canvas: &mut C, current: Selection) -> Result<(), DisplayError> {
    canvas.clear(BACKGROUND)?;
    canvas.draw_text(Point::new(75, 14), TITLE, TextStyle::medium(Color::WHITE))?;

    for selection in Selection::all() {
        let rect = icon_rect(selection);
        icons::draw_icon(canvas, selection.app(), rect)?;
        canvas.draw_text(
            Point::new(rect.x + 10, rect.bottom() + 6),
            selection.app().label(),
            TextStyle::small(Color::WHITE),
        )?;
    }

    draw_cell(canvas, current, true)
}

/// Move the cursor, touching only the two affected cells
pub fn move_cursor<C: Canvas + ?Sized>(
    canvas: &mut C,
    previous: Selection,
    current: Selection,
) -> Result<(), DisplayError> {
    draw_cell(canvas, previous, false)?;
    draw_cell(canvas, current, true)
}

fn draw_cell<C: Canvas + ?Sized>(
    canvas: &mut C,
    selection: Selection,
    selected: bool,
) -> Result<(), DisplayError> {
    let frame = if selected { SELECT_COLOR } else { BACKGROUND };
    canvas.fill_clipped(cell_rect(selection), frame)?;
    icons::draw_icon(canvas, selection.app(), icon_rect(selection))
}

/// Stick navigation with a cooldown between accepted gestures
#[derive(Debug, Clone, Copy, Default)]
pub struct Navigator {
    cooldown: u8,
}

impl Navigator {
    pub const fn new() -> Self {
        Self { cooldown: 0 }
    }

    /// Apply one stick sample; returns the new selection
    pub fn step(
        &mut self,
        stick: &StickConfig,
        reading: StickReading,
        current: Selection,
        cooldown: u8,
    ) -> Selection {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return current;
        }
        match stick.direction(reading) {
            Some(direction) => {
                self.cooldown = cooldown;
                current.step(direction)
            }
            None => current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCanvas;

    fn sel(i: u8) -> Selection {
        Selection::new(i).unwrap()
    }

    #[test]
    fn test_icon_layout() {
        assert_eq!(icon_rect(sel(0)), Rect::new(30, 50, 80, 80));
        assert_eq!(icon_rect(sel(1)), Rect::new(140, 50, 80, 80));
        assert_eq!(icon_rect(sel(2)), Rect::new(30, 160, 80, 80));
        assert_eq!(icon_rect(sel(3)), Rect::new(140, 160, 80, 80));
    }

    #[test]
    fn test_full_redraw() {
        let mut canvas = RecordingCanvas::new();
        draw_home(&mut canvas, sel(1)).unwrap();

        assert!(canvas.has_text("HOME MENU"));
        for label in ["Camera", "Compass", "Weather", "Frogger"] {
            assert!(canvas.has_text(label));
        }
        // Frame around the selected icon, none around the others
        assert_eq!(canvas.at(138, 48), SELECT_COLOR);
        assert_eq!(canvas.at(28, 48), BACKGROUND);
    }

    #[test]
    fn test_cursor_move_touches_two_cells() {
        let mut canvas = RecordingCanvas::new();
        draw_home(&mut canvas, sel(0)).unwrap();
        canvas.clear_ops();

        move_cursor(&mut canvas, sel(0), sel(2)).unwrap();
        let first = cell_rect(sel(0));
        let second = cell_rect(sel(2));
        for op in &canvas.ops {
            if let crate::testing::Op::Fill(rect, _) = op {
                assert!(first.intersects(rect) || second.intersects(rect));
            }
        }
        assert_eq!(canvas.at(28, 48), BACKGROUND);
        assert_eq!(canvas.at(28, 158), SELECT_COLOR);
    }

    #[test]
    fn test_navigator_cooldown() {
        let stick = StickConfig::default();
        let right = StickReading::new(4095, 2048);
        let down = StickReading::new(2048, 0);
        let mut nav = Navigator::new();

        let s = nav.step(&stick, right, sel(0), 1);
        assert_eq!(s.index(), 1);
        // Cooling down: ignored
        let s = nav.step(&stick, down, s, 1);
        assert_eq!(s.index(), 1);
        let s = nav.step(&stick, down, s, 1);
        assert_eq!(s.index(), 3);
    }

    #[test]
    fn test_board_stick_x_channel_toggles_row() {
        // The board's stick is mounted rotated: raw X is the vertical axis
        let stick = StickConfig {
            swap_axes: true,
            invert_x: true,
            ..StickConfig::default()
        };
        let mut nav = Navigator::new();
        let s = nav.step(&stick, StickReading::new(0, 2048), sel(0), 0);
        assert_eq!(s.index(), 2);
        assert_eq!(icon_rect(s).y, 160);
        let s = nav.step(&stick, StickReading::new(4095, 2048), s, 0);
        assert_eq!(s.index(), 0);
        let s = nav.step(&stick, StickReading::new(2048, 0), s, 0);
        assert_eq!(s.index(), 1);
    }

    #[test]
    fn test_navigator_centered_stick_keeps_selection() {
        let stick = StickConfig::default();
        let mut nav = Navigator::new();
        assert_eq!(nav.step(&stick, stick.centered(), sel(3), 1), sel(3));
    }
}
