// file: src/models/toggle.rs
use serde::{Deserialize, Serialize};

/// Optimistic toggle state for one switch.
///
/// `Pending*` report the requested target from `is_on()` so the UI reflects
/// the user's action before the network settles. `Idle` is both the initial
/// state and where a switch lands after a group force-off, since no request
/// of its own settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Idle { on: bool },
    PendingOn,
    PendingOff,
    SettledOn,
    SettledOff,
}

impl ToggleState {
    pub fn from_initial(on: bool) -> Self {
        ToggleState::Idle { on }
    }

    pub fn is_on(&self) -> bool {
        match self {
            ToggleState::Idle { on } => *on,
            ToggleState::PendingOn | ToggleState::SettledOn => true,
            ToggleState::PendingOff | ToggleState::SettledOff => false,
        }
    }

    pub fn in_flight(&self) -> bool {
        matches!(self, ToggleState::PendingOn | ToggleState::PendingOff)
    }

    /// Optimistic transition taken before the remote call is issued.
    pub fn begin(&mut self, target_on: bool) {
        *self = if target_on {
            ToggleState::PendingOn
        } else {
            ToggleState::PendingOff
        };
    }

    /// Settle the in-flight request successfully.
    ///
    /// No-op unless a pending state is still current: a late success must
    /// not resurrect "on" after a group signal forced the switch off
    /// mid-flight.
    pub fn settle_success(&mut self) {
        match self {
            ToggleState::PendingOn => *self = ToggleState::SettledOn,
            ToggleState::PendingOff => *self = ToggleState::SettledOff,
            _ => {}
        }
    }

    /// Error path: the switch always lands off, whichever direction the
    /// failed request was headed.
    pub fn rollback(&mut self) {
        *self = ToggleState::SettledOff;
    }

    /// Group reconciliation: local state only, no request settled for this
    /// switch.
    pub fn force_off(&mut self) {
        *self = ToggleState::Idle { on: false };
    }
}

/// Ephemeral broadcast correlating switches in the same exclusivity group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupToggleSignal {
    pub group_id: String,
    pub unique_id: String,
}
