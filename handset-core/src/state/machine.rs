//! State machine definition
//!
//! All display ownership is a function of the current state and an event.

use super::events::Event;
use super::selection::Selection;

/// Apps reachable from the launcher, in icon order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppId {
    Camera,
    Compass,
    Weather,
    Game,
}

impl AppId {
    /// Every app, indexed by launcher icon
    pub const ALL: [AppId; 4] = [AppId::Camera, AppId::Compass, AppId::Weather, AppId::Game];

    /// Label drawn under the launcher icon
    pub fn label(self) -> &'static str {
        match self {
            AppId::Camera => "Camera",
            AppId::Compass => "Compass",
            AppId::Weather => "Weather",
            AppId::Game => "Frogger",
        }
    }
}

/// Lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppState {
    /// Lock screen; waiting for the companion to recognise the user
    #[default]
    Locked,
    /// Icon grid visible, no app running
    Launcher,
    /// An app owns the display
    Running(AppId),
}

impl AppState {
    /// The running app, if any
    pub fn app(&self) -> Option<AppId> {
        match self {
            AppState::Running(app) => Some(*app),
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, AppState::Locked)
    }

    /// Process an event and return the next state
    ///
    /// Unlisted pairs leave the state unchanged. Nothing returns to `Locked`.
    pub fn transition(self, event: Event) -> Self {
        use AppState::*;
        use Event::*;

        match (self, event) {
            // Lock screen
            (Locked, Unlock) => Launcher,

            // Launcher
            (Launcher, Select(selection)) => Running(selection.app()),

            // Apps
            (Running(_), Home) => Launcher,

            // Default: stay in current state
            _ => self,
        }
    }
}

/// Shared focus record: lifecycle state, launcher cursor, shutter request
///
/// Copied in and out of a critical section as a whole so readers always see
/// a consistent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Focus {
    pub state: AppState,
    pub selection: Selection,
    pub photo_requested: bool,
}

impl Focus {
    /// Apply an event to the lifecycle and raise the shutter request
    /// when SELECT arrives inside the camera app
    pub fn apply(self, event: Event) -> Self {
        let photo = matches!(
            (self.state, event),
            (AppState::Running(AppId::Camera), Event::Select(_))
        );
        Self {
            state: self.state.transition(event),
            photo_requested: self.photo_requested || photo,
            ..self
        }
    }
}
