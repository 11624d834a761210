//! Repaint lists produced by the engine

use handset_display::{Canvas, CanvasExt, Color, DisplayError, Rect};

/// Repaints queued per tick
pub const PAINT_CAPACITY: usize = 128;

/// One solid fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paint {
    pub rect: Rect,
    pub color: Color,
}

/// Fills in paint order; later entries cover earlier ones
#[derive(Debug, Default)]
pub struct PaintList {
    items: heapless::Vec<Paint, PAINT_CAPACITY>,
}

impl PaintList {
    pub const fn new() -> Self {
        Self {
            items: heapless::Vec::new(),
        }
    }

    /// Queue a fill; empty or fully off-screen rectangles are dropped
    pub fn fill(&mut self, rect: Rect, color: Color) {
        let Some(visible) = rect.clip() else {
            return;
        };
        if self.items.push(Paint { rect: visible, color }).is_err() {
            warn!("paint list full, dropping fill");
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Paint> {
        self.items.iter()
    }

    /// Draw every queued fill in order
    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<(), DisplayError> {
        for paint in self.items.iter() {
            canvas.fill_clipped(paint.rect, paint.color)?;
        }
        Ok(())
    }
}
