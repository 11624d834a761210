//! Embassy async tasks
//!
//! Three tasks share the [`Board`](crate::Board) context:
//! - `home_task` drives the lock screen, launcher and apps
//! - `button_watch_task` owns the button GPIO and latches edges
//! - `input_task` turns latched edges into lifecycle events

pub mod buttons;
pub mod home;
pub mod input;

pub use buttons::button_watch_task;
pub use home::home_task;
pub use input::input_task;
