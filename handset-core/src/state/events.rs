//! Events that trigger lifecycle transitions

use super::selection::Selection;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Companion recognised the user (`'U'` on the link)
    Unlock,
    /// SELECT pressed while the launcher cursor was on this icon
    Select(Selection),
    /// HOME pressed
    Home,
}

/// Button bits in the pad mask
pub mod buttons {
    /// SELECT; also the camera shutter
    pub const SELECT: u8 = 0x02;
    /// HOME; leaves the running app
    pub const HOME: u8 = 0x10;
}

/// Rising-edge detector for the button mask
///
/// Holds the previous mask; a button fires once per press, not while held.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdges {
    previous: u8,
}

/// Buttons that went down since the previous sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pressed {
    pub select: bool,
    pub home: bool,
}

impl ButtonEdges {
    pub const fn new() -> Self {
        Self { previous: 0 }
    }

    /// Feed a new mask and return the buttons that were just pressed
    pub fn update(&mut self, mask: u8) -> Pressed {
        let rising = mask & !self.previous;
        self.previous = mask;
        Pressed {
            select: rising & buttons::SELECT != 0,
            home: rising & buttons::HOME != 0,
        }
    }
}
