//! App lifecycle state machine
//!
//! Which screen owns the display is a function of the current state and the
//! last event. The state lives in the shared focus record; the input task and
//! the home task both feed it events.

pub mod events;
pub mod machine;
pub mod selection;

pub use events::{buttons, ButtonEdges, Event, Pressed};
pub use machine::{AppId, AppState, Focus};
pub use selection::{Direction, Selection};
