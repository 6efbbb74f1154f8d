// file: src/models/switch.rs
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Inputs for one calendar sync switch, fixed for the switch's lifetime.
///
/// A switch binds one external calendar connection (identified by
/// `external_id` + `credential_id`) to the scheduling app, either for the
/// whole user (`event_type_id` absent) or scoped to a single event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchProps {
    /// Mark the calendar as free/busy-transparent when syncing.
    pub is_free: bool,
    /// Human-readable calendar title, used in error toasts.
    pub title: String,
    /// The calendar's id at the external provider.
    pub external_id: String,
    /// Integration identifier, e.g. "google_calendar".
    pub integration: String,
    /// Initial checked state.
    pub is_checked: bool,
    /// Display label next to the control.
    pub name: String,
    /// Stored connection used to reach the provider.
    pub credential_id: i64,
    pub delegation_credential_id: Option<String>,
    /// None for user-level switches, set for event-scoped ones.
    pub event_type_id: Option<i64>,
    /// The control is inert while set.
    pub disabled: bool,
    /// Switches sharing a group id are mutually exclusive.
    pub group_id: Option<String>,
    /// Distinguishes this switch from its group siblings.
    pub unique_id: String,
    /// This calendar is the booking destination.
    pub destination: bool,
}

impl SwitchProps {
    /// User-level variant: never scoped to an event type.
    pub fn user_level(mut self) -> Self {
        self.event_type_id = None;
        self
    }

    /// Event-scoped variant: bound to the event type being edited.
    pub fn event_scoped(mut self, event_type_id: i64) -> Self {
        self.event_type_id = Some(event_type_id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.external_id.trim().is_empty() {
            return Err(anyhow!("external_id cannot be empty"));
        }
        if self.integration.trim().is_empty() {
            return Err(anyhow!("integration cannot be empty"));
        }
        if self.unique_id.trim().is_empty() {
            return Err(anyhow!("unique_id cannot be empty"));
        }
        if self.credential_id <= 0 {
            return Err(anyhow!(
                "credential_id must be positive, got {}",
                self.credential_id
            ));
        }
        if let Some(event_type_id) = self.event_type_id {
            if event_type_id <= 0 {
                return Err(anyhow!(
                    "event_type_id must be positive, got {}",
                    event_type_id
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> SwitchProps {
        SwitchProps {
            is_free: true,
            title: "Google Calendar".to_string(),
            external_id: "cal-1".to_string(),
            integration: "google_calendar".to_string(),
            is_checked: false,
            name: "Work".to_string(),
            credential_id: 42,
            delegation_credential_id: None,
            event_type_id: Some(7),
            disabled: false,
            group_id: None,
            unique_id: "cal-1-42".to_string(),
            destination: false,
        }
    }

    #[test]
    fn test_user_level_clears_event_type() {
        let props = props().user_level();
        assert_eq!(props.event_type_id, None);
    }

    #[test]
    fn test_event_scoped_sets_event_type() {
        let props = props().event_scoped(99);
        assert_eq!(props.event_type_id, Some(99));
    }

    #[test]
    fn test_validate_accepts_well_formed_props() {
        assert!(props().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_external_id() {
        let mut props = props();
        props.external_id = "  ".to_string();
        let result = props.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("external_id"));
    }

    #[test]
    fn test_validate_rejects_non_positive_credential_id() {
        let mut props = props();
        props.credential_id = 0;
        let result = props.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("credential_id"));
    }

    #[test]
    fn test_validate_rejects_non_positive_event_type_id() {
        let props = props().event_scoped(-1);
        assert!(props.validate().is_err());
    }
}
