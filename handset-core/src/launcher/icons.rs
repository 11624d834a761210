//! Procedural launcher icons
//!
//! Each icon is drawn from primitives inside its 80×80 box so the launcher
//! needs no bitmap assets.

use handset_display::{Canvas, CanvasExt, Color, DisplayError, Point, Rect};

use crate::game::palette;
use crate::state::AppId;

const TILE: Color = Color(0x2104);

/// Draw the icon for `app` filling `rect`
pub fn draw_icon<C: Canvas + ?Sized>(canvas: &mut C, app: AppId, rect: Rect) -> Result<(), DisplayError> {
    canvas.fill_clipped(rect, TILE)?;
    let c = Point::new(rect.x + rect.w / 2, rect.y + rect.h / 2);
    match app {
        AppId::Camera => camera(canvas, rect, c),
        AppId::Compass => compass(canvas, c),
        AppId::Weather => weather(canvas, rect, c),
        AppId::Game => frog(canvas, rect, c),
    }
}

fn camera<C: Canvas + ?Sized>(canvas: &mut C, rect: Rect, c: Point) -> Result<(), DisplayError> {
    let body = Rect::new(rect.x + 12, rect.y + 24, rect.w - 24, rect.h - 40);
    canvas.fill_clipped(body, Color::GREY)?;
    canvas.fill_clipped(Rect::new(body.x + 8, body.y - 6, 16, 6), Color::GREY)?;
    canvas.draw_circle(Point::new(c.x, c.y + 4), 12, Color::WHITE)?;
    canvas.draw_circle(Point::new(c.x, c.y + 4), 6, Color::CYAN)
}

fn compass<C: Canvas + ?Sized>(canvas: &mut C, c: Point) -> Result<(), DisplayError> {
    canvas.draw_circle(c, 30, Color::WHITE)?;
    canvas.draw_line(c, Point::new(c.x, c.y - 24), Color::RED)?;
    canvas.draw_line(c, Point::new(c.x, c.y + 24), Color::WHITE)?;
    canvas.draw_line(Point::new(c.x - 4, c.y - 18), Point::new(c.x, c.y - 24), Color::RED)?;
    canvas.draw_line(Point::new(c.x + 4, c.y - 18), Point::new(c.x, c.y - 24), Color::RED)
}

fn weather<C: Canvas + ?Sized>(canvas: &mut C, rect: Rect, c: Point) -> Result<(), DisplayError> {
    let sun = Point::new(c.x - 10, c.y - 10);
    canvas.draw_circle(sun, 14, Color::YELLOW)?;
    canvas.draw_circle(sun, 9, Color::YELLOW)?;
    // Cloud in front of the sun
    canvas.fill_clipped(Rect::new(rect.x + 22, c.y + 6, 44, 16), Color::WHITE)?;
    canvas.fill_clipped(Rect::new(rect.x + 32, c.y - 2, 22, 8), Color::WHITE)
}

fn frog<C: Canvas + ?Sized>(canvas: &mut C, rect: Rect, c: Point) -> Result<(), DisplayError> {
    canvas.fill_clipped(Rect::new(rect.x, rect.bottom() - 16, rect.w, 16), palette::ROAD)?;
    canvas.fill_clipped(Rect::new(c.x - 14, c.y - 12, 28, 26), palette::FROG)?;
    // Eyes
    canvas.fill_clipped(Rect::new(c.x - 12, c.y - 18, 8, 8), palette::FROG)?;
    canvas.fill_clipped(Rect::new(c.x + 4, c.y - 18, 8, 8), palette::FROG)?;
    canvas.draw_pixel(Point::new(c.x - 8, c.y - 14), Color::BLACK)?;
    canvas.draw_pixel(Point::new(c.x + 8, c.y - 14), Color::BLACK)
}
