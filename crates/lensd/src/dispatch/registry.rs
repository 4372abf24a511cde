//! Action name resolution.
//!
//! The registry is a fixed table mapping wire names to [`ActionKind`]
//! variants. Names are matched exactly; `Battery` is not `battery`.

use super::actions::{self, ActionHandler};
use super::errors::ActionError;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// The built-in actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// List sound assets.
    Sounds,
    /// Foreground flag as `"1"`/`"0"`.
    Screen,
    /// Play a sound asset.
    Play,
    /// Read the streaming configuration.
    Get,
    /// Replace the streaming configuration.
    Set,
    /// Report device usage and the last error.
    State,
    /// Clear the last error.
    Clear,
    /// Report the battery level.
    Battery,
    /// Pulse the vibration motor.
    Buzz,
}

/// Lookup table from wire name to action.
const ACTIONS: &[(&str, ActionKind)] = &[
    ("sounds", ActionKind::Sounds),
    ("screen", ActionKind::Screen),
    ("play", ActionKind::Play),
    ("get", ActionKind::Get),
    ("set", ActionKind::Set),
    ("state", ActionKind::State),
    ("clear", ActionKind::Clear),
    ("battery", ActionKind::Battery),
    ("buzz", ActionKind::Buzz),
];

impl ActionKind {
    /// Resolves a wire name.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::UnknownAction` for names outside the table.
    pub fn lookup(name: &str) -> Result<Self, ActionError> {
        ACTIONS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ActionError::unknown_action(name))
    }

    /// Wire names of every registered action, in table order.
    #[must_use]
    pub fn names() -> impl Iterator<Item = &'static str> {
        ACTIONS.iter().map(|(name, _)| *name)
    }

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sounds => "sounds",
            Self::Screen => "screen",
            Self::Play => "play",
            Self::Get => "get",
            Self::Set => "set",
            Self::State => "state",
            Self::Clear => "clear",
            Self::Battery => "battery",
            Self::Buzz => "buzz",
        }
    }

    /// Handler implementing the action.
    pub(crate) const fn handler(self) -> ActionHandler {
        match self {
            Self::Sounds => actions::sounds,
            Self::Screen => actions::screen,
            Self::Play => actions::play,
            Self::Get => actions::get,
            Self::Set => actions::set,
            Self::State => actions::state,
            Self::Clear => actions::clear,
            Self::Battery => actions::battery,
            Self::Buzz => actions::buzz,
        }
    }
}
