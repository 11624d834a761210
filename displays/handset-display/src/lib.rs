//! Display abstraction and shared drawing components for the handset
//!
//! This crate provides:
//! - `Canvas` trait, the only way application code touches the panel
//! - `Rect`/`Point` geometry with clipping and horizontal dirty-region deltas
//! - `Color` (RGB565) and the shared palette
//! - `GraphicsCanvas`, a `Canvas` over any `embedded-graphics` draw target
//! - `St7789`, the 240×280 SPI panel driver used by the firmware
//!
//! # Architecture
//!
//! Application code draws through `Canvas` and never sees the panel type,
//! so host tests substitute a recording canvas. Coordinates are pixels with
//! the origin at the top-left corner; callers clip against [`SCREEN`] before
//! drawing and implementations clip again.

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
pub mod color;
pub mod geometry;
pub mod graphics;
pub mod st7789;

// Re-export key types
pub use canvas::{Canvas, CanvasExt, DisplayError, TextSize, TextStyle};
pub use color::Color;
pub use geometry::{Delta, Point, Rect, SCREEN, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use graphics::GraphicsCanvas;
pub use st7789::St7789;
