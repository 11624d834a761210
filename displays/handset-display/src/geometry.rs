//! Pixel geometry: points, rectangles, clipping and dirty-region deltas

/// Panel width in pixels
pub const SCREEN_WIDTH: i32 = 240;

/// Panel height in pixels
pub const SCREEN_HEIGHT: i32 = 280;

/// The whole panel
pub const SCREEN: Rect = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);

/// A pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, half-open on the right and bottom edges
///
/// `w` and `h` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Strips to repaint after a rectangle slid horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Delta {
    /// Uncovered by the move; repaint with the background
    pub vacated: Option<Rect>,
    /// Newly covered by the move; repaint with the object
    pub exposed: Option<Rect>,
}

impl Rect {
    /// Create a rectangle; negative sizes collapse to zero
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: if w < 0 { 0 } else { w },
            h: if h < 0 { 0 } else { h },
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub const fn area(&self) -> i32 {
        self.w * self.h
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Grow (or shrink, with a negative margin) on every side
    pub fn inflate(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.w + 2 * margin,
            self.h + 2 * margin,
        )
    }

    /// Same size, moved to a new left edge
    pub fn with_x(&self, x: i32) -> Rect {
        Rect { x, ..*self }
    }

    /// Overlapping area, or `None` if the rectangles do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// The visible part of this rectangle on the panel
    pub fn clip(&self) -> Option<Rect> {
        self.intersection(&SCREEN)
    }

    /// Dirty strips for this rectangle sliding horizontally to `new_x`
    ///
    /// The vacated and exposed strips are disjoint and together cover exactly
    /// the symmetric difference of the old and new rectangles. When the move
    /// is at least as wide as the rectangle, the strips are the whole old and
    /// whole new rectangles.
    pub fn horizontal_delta(&self, new_x: i32) -> Delta {
        let dx = new_x - self.x;
        if dx == 0 || self.is_empty() {
            return Delta::default();
        }

        let moved = self.with_x(new_x);
        if dx.abs() >= self.w {
            return Delta {
                vacated: Some(*self),
                exposed: Some(moved),
            };
        }

        if dx > 0 {
            Delta {
                vacated: Some(Rect::new(self.x, self.y, dx, self.h)),
                exposed: Some(Rect::new(self.right(), self.y, dx, self.h)),
            }
        } else {
            Delta {
                vacated: Some(Rect::new(moved.right(), self.y, -dx, self.h)),
                exposed: Some(Rect::new(new_x, self.y, -dx, self.h)),
            }
        }
    }
}
