//! Presentation state for the visual switch collaborator
//!
//! The crate does no rendering. Hosts pull a snapshot per frame and hand it
//! to whatever widget toolkit draws the page.

use chrono::{DateTime, Utc};

/// What the visual switch widget needs to draw one control.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSnapshot {
    /// Stable control id (the calendar's external id).
    pub id: String,
    /// Display label.
    pub label: String,
    pub checked: bool,
    /// True when prop-disabled or while a request is in flight.
    pub disabled: bool,
    /// Spinner affordance while a request is in flight.
    pub spinner: bool,
    /// Show the "adding events to" destination hint.
    pub destination: bool,
    /// When the last request settled, for sync-recency display.
    pub last_settled_at: Option<DateTime<Utc>>,
}
