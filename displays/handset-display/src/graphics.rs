//! `Canvas` over any `embedded-graphics` draw target

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Point as EgPoint, Size};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{Circle, Line, Primitive, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};

use crate::canvas::{Canvas, DisplayError, TextSize, TextStyle};
use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Adapter from a `DrawTarget<Color = Rgb565>` to [`Canvas`]
///
/// Fonts are chosen per [`TextSize`]; glyph shapes are whatever the mono
/// font provides.
pub struct GraphicsCanvas<T> {
    target: T,
}

impl<T> GraphicsCanvas<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: T) -> Self {
        Self { target }
    }

    /// Access the wrapped target
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Release the wrapped target
    pub fn into_inner(self) -> T {
        self.target
    }
}

fn rgb(color: Color) -> Rgb565 {
    Rgb565::from(RawU16::new(color.raw()))
}

fn eg_point(p: Point) -> EgPoint {
    EgPoint::new(p.x, p.y)
}

fn eg_rect(r: Rect) -> Rectangle {
    Rectangle::new(EgPoint::new(r.x, r.y), Size::new(r.w as u32, r.h as u32))
}

fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Small => &FONT_6X10,
        TextSize::Medium | TextSize::Large => &FONT_10X20,
    }
}

impl<T> Canvas for GraphicsCanvas<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        if rect.is_empty() {
            return Ok(());
        }
        self.target
            .fill_solid(&eg_rect(rect), rgb(color))
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_pixel(&mut self, at: Point, color: Color) -> Result<(), DisplayError> {
        Pixel(eg_point(at), rgb(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), DisplayError> {
        Line::new(eg_point(from), eg_point(to))
            .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Color,
    ) -> Result<(), DisplayError> {
        Circle::with_center(eg_point(center), radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        style: TextStyle,
    ) -> Result<(), DisplayError> {
        let character_style = MonoTextStyle::new(font(style.size), rgb(style.color));
        Text::with_baseline(text, eg_point(origin), character_style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_span(&mut self, origin: Point, pixels: &[Color]) -> Result<(), DisplayError> {
        if pixels.is_empty() {
            return Ok(());
        }
        let area = Rectangle::new(eg_point(origin), Size::new(pixels.len() as u32, 1));
        self.target
            .fill_contiguous(&area, pixels.iter().map(|&c| rgb(c)))
            .map_err(|_| DisplayError::Communication)
    }
}
