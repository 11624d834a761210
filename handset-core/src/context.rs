//! Shared handset context
//!
//! Everything the tasks share lives in one [`Handset`] value that the
//! firmware places in a `StaticCell` and hands to every task by reference.
//!
//! - the display and the shared bus sit inside async mutexes, so neither is
//!   reachable without holding its lock
//! - the focus record (lifecycle state, launcher cursor, shutter request) is
//!   a small `Copy` value behind a blocking critical-section mutex
//! - [`ButtonIrq`] is the one-shot interrupt handoff to the input task
//!
//! Lock order: when both are needed, take `bus` before `display`.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use crate::config::HandsetConfig;
use crate::link::CompanionLink;
use crate::state::{AppId, AppState, Event, Focus, Selection};

/// Devices behind the bus lock: the companion link and the heading sensor
pub struct SharedBus<S, G> {
    pub link: CompanionLink<S>,
    pub compass: G,
}

impl<S, G> SharedBus<S, G> {
    pub fn new(link: CompanionLink<S>, compass: G) -> Self {
        Self { link, compass }
    }
}

/// Button interrupt handoff
///
/// The edge handler disarms itself and signals the input task; the input
/// task re-arms it after it has read the buttons. At most one edge is in
/// flight.
pub struct ButtonIrq<M: RawMutex> {
    armed: BlockingMutex<M, Cell<bool>>,
    pending: Signal<M, ()>,
    rearmed: Signal<M, ()>,
}

impl<M: RawMutex> Default for ButtonIrq<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> ButtonIrq<M> {
    pub const fn new() -> Self {
        Self {
            armed: BlockingMutex::new(Cell::new(true)),
            pending: Signal::new(),
            rearmed: Signal::new(),
        }
    }

    /// Called from the edge handler; false if the source was disarmed
    pub fn on_edge(&self) -> bool {
        let was_armed = self.armed.lock(|armed| armed.replace(false));
        if was_armed {
            self.pending.signal(());
        }
        was_armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed.lock(|armed| armed.get())
    }

    /// Input task side: wait for an edge
    pub async fn wait(&self) {
        self.pending.wait().await
    }

    /// Input task side: enable the source again
    pub fn rearm(&self) {
        self.armed.lock(|armed| armed.set(true));
        self.rearmed.signal(());
    }

    /// Edge handler side: wait until the source is enabled
    pub async fn wait_armed(&self) {
        while !self.is_armed() {
            self.rearmed.wait().await;
        }
    }
}

/// Shared state handed to every task
pub struct Handset<M: RawMutex, D, S, G> {
    /// Display lock
    pub display: Mutex<M, D>,
    /// Bus lock
    pub bus: Mutex<M, SharedBus<S, G>>,
    /// Button interrupt handoff
    pub buttons: ButtonIrq<M>,
    pub config: HandsetConfig,
    focus: BlockingMutex<M, Cell<Focus>>,
}

impl<M: RawMutex, D, S, G> Handset<M, D, S, G> {
    pub fn new(display: D, bus: SharedBus<S, G>, config: HandsetConfig) -> Self {
        Self {
            display: Mutex::new(display),
            bus: Mutex::new(bus),
            buttons: ButtonIrq::new(),
            config,
            focus: BlockingMutex::new(Cell::new(Focus::default())),
        }
    }

    /// Snapshot of the focus record
    pub fn focus(&self) -> Focus {
        self.focus.lock(|f| f.get())
    }

    pub fn state(&self) -> AppState {
        self.focus().state
    }

    /// True while `app` owns the display
    pub fn is_running(&self, app: AppId) -> bool {
        self.state() == AppState::Running(app)
    }

    /// Feed an event to the lifecycle
    pub fn dispatch(&self, event: Event) -> Focus {
        self.update(|focus| focus.apply(event))
    }

    /// SELECT pressed: resolve against the current cursor in one step
    pub fn press_select(&self) -> Focus {
        self.update(|focus| focus.apply(Event::Select(focus.selection)))
    }

    /// Move the launcher cursor
    pub fn set_selection(&self, selection: Selection) {
        self.focus.lock(|f| {
            let mut focus = f.get();
            focus.selection = selection;
            f.set(focus);
        });
    }

    /// Clear and return the shutter request
    pub fn take_photo_request(&self) -> bool {
        self.focus.lock(|f| {
            let mut focus = f.get();
            let requested = focus.photo_requested;
            focus.photo_requested = false;
            f.set(focus);
            requested
        })
    }

    fn update(&self, apply: impl FnOnce(Focus) -> Focus) -> Focus {
        let (before, after) = self.focus.lock(|f| {
            let before = f.get();
            let after = apply(before);
            f.set(after);
            (before, after)
        });
        if before.state != after.state {
            info!("lifecycle {} -> {}", before.state, after.state);
        }
        after
    }
}
