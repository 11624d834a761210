//! Button lines, edge watching and the latched mask
//!
//! The watcher owns the GPIO inputs. On an edge it latches the current mask,
//! disarms the handoff and wakes the input task, which reads the latch
//! through [`LatchReader`].

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_futures::select::select;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::RawMutex;
use handset_core::state::buttons;
use handset_core::traits::ButtonPad;
use handset_core::ButtonIrq;

/// Pressed buttons as a mask; inputs are active low
pub const fn mask_from_levels(select_low: bool, home_low: bool) -> u8 {
    let mut mask = 0;
    if select_low {
        mask |= buttons::SELECT;
    }
    if home_low {
        mask |= buttons::HOME;
    }
    mask
}

/// SELECT and HOME inputs, pulled up
pub struct ButtonLines<'d> {
    select: Input<'d>,
    home: Input<'d>,
}

impl<'d> ButtonLines<'d> {
    pub fn new(select: Input<'d>, home: Input<'d>) -> Self {
        Self { select, home }
    }

    /// Current mask
    pub fn mask(&self) -> u8 {
        mask_from_levels(self.select.is_low(), self.home.is_low())
    }

    /// Wait for any edge on either line
    pub async fn wait_for_edge(&mut self) {
        select(self.select.wait_for_any_edge(), self.home.wait_for_any_edge()).await;
    }

    /// Edge watcher loop; stands in for the GPIO interrupt handler
    pub async fn watch<M: RawMutex>(&mut self, latch: &ButtonLatch, irq: &ButtonIrq<M>) -> ! {
        loop {
            irq.wait_armed().await;
            self.wait_for_edge().await;
            latch.store(self.mask());
            irq.on_edge();
        }
    }
}

/// Mask captured at the last edge
pub struct ButtonLatch {
    mask: AtomicU8,
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            mask: AtomicU8::new(0),
        }
    }

    pub fn store(&self, mask: u8) {
        self.mask.store(mask, Ordering::Release);
    }

    pub fn load(&self) -> u8 {
        self.mask.load(Ordering::Acquire)
    }

    /// `ButtonPad` view for the input task
    pub fn reader(&self) -> LatchReader<'_> {
        LatchReader { latch: self }
    }
}

/// Reads the latched mask
pub struct LatchReader<'a> {
    latch: &'a ButtonLatch,
}

impl ButtonPad for LatchReader<'_> {
    fn read_mask(&mut self) -> u8 {
        self.latch.load()
    }
}
