//! Canvas trait
//!
//! Defines the drawing interface application code uses. Implementations
//! handle the specifics of the panel and must clip out-of-bounds requests
//! instead of wrapping or failing.

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel (SPI or control pin)
    Communication,
    /// Panel not initialized
    NotInitialized,
}

/// Glyph scale for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Labels and detail lines
    #[default]
    Small,
    /// Headlines
    Medium,
    /// Clock and temperature
    Large,
}

/// Text color and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub color: Color,
    pub size: TextSize,
}

impl TextStyle {
    pub const fn new(color: Color, size: TextSize) -> Self {
        Self { color, size }
    }

    pub const fn small(color: Color) -> Self {
        Self::new(color, TextSize::Small)
    }

    pub const fn medium(color: Color) -> Self {
        Self::new(color, TextSize::Medium)
    }

    pub const fn large(color: Color) -> Self {
        Self::new(color, TextSize::Large)
    }
}

/// Drawing surface
///
/// Provides the handful of primitives the apps need. Text is drawn with a
/// transparent background; `origin` is the top-left corner of the first
/// glyph.
pub trait Canvas {
    /// Fill a rectangle with a solid color
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError>;

    /// Set a single pixel
    fn draw_pixel(&mut self, at: Point, color: Color) -> Result<(), DisplayError>;

    /// Draw a one pixel wide line between two points (inclusive)
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), DisplayError>;

    /// Draw a one pixel wide circle outline
    fn draw_circle(&mut self, center: Point, radius: u32, color: Color)
        -> Result<(), DisplayError>;

    /// Draw a line of text
    fn draw_text(&mut self, origin: Point, text: &str, style: TextStyle)
        -> Result<(), DisplayError>;

    /// Draw a horizontal run of pixels starting at `origin`
    fn draw_span(&mut self, origin: Point, pixels: &[Color]) -> Result<(), DisplayError> {
        for (i, &color) in pixels.iter().enumerate() {
            self.draw_pixel(Point::new(origin.x + i as i32, origin.y), color)?;
        }
        Ok(())
    }
}

/// Helpers built from the primitives
pub trait CanvasExt: Canvas {
    /// Fill the whole panel
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        self.fill_rect(crate::geometry::SCREEN, color)
    }

    /// Fill the visible part of a rectangle; fully off-screen requests are dropped
    fn fill_clipped(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        match rect.clip() {
            Some(visible) => self.fill_rect(visible, color),
            None => Ok(()),
        }
    }

    /// Draw a rectangular frame of the given thickness inside `rect`
    fn draw_frame(&mut self, rect: Rect, thickness: i32, color: Color) -> Result<(), DisplayError> {
        let t = thickness.min(rect.w / 2).min(rect.h / 2).max(0);
        self.fill_clipped(Rect::new(rect.x, rect.y, rect.w, t), color)?;
        self.fill_clipped(Rect::new(rect.x, rect.bottom() - t, rect.w, t), color)?;
        self.fill_clipped(Rect::new(rect.x, rect.y + t, t, rect.h - 2 * t), color)?;
        self.fill_clipped(
            Rect::new(rect.right() - t, rect.y + t, t, rect.h - 2 * t),
            color,
        )
    }

    /// Draw text only when present
    fn draw_optional_text(
        &mut self,
        origin: Point,
        text: Option<&str>,
        style: TextStyle,
    ) -> Result<(), DisplayError> {
        match text {
            Some(text) if !text.is_empty() => self.draw_text(origin, text, style),
            _ => Ok(()),
        }
    }
}

// Blanket implementation for all Canvas types
impl<T: Canvas + ?Sized> CanvasExt for T {}
