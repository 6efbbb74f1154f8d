// Availability API client
// Enables/disables syncing of a selected external calendar for scheduling.

use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::SwitchProps;
use anyhow::{anyhow, Result};
use log::debug;
use reqwest::Client;
use url::Url;

/// Endpoint path for selected-calendar state, relative to the API base.
pub const AVAILABILITY_CALENDAR_PATH: &str = "/availability/calendar";

/// Wire shape shared by the enable body and the disable query string.
///
/// Numeric ids are stringified because the disable path carries the same
/// fields as query parameters. Optional fields are omitted entirely when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCalendarPayload {
    pub integration: String,
    pub external_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation_credential_id: Option<String>,
    pub credential_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type_id: Option<String>,
    pub free: bool,
}

impl SelectedCalendarPayload {
    pub fn from_props(props: &SwitchProps) -> Self {
        Self {
            integration: props.integration.clone(),
            external_id: props.external_id.clone(),
            delegation_credential_id: props.delegation_credential_id.clone(),
            credential_id: props.credential_id.to_string(),
            event_type_id: props.event_type_id.map(|id| id.to_string()),
            free: props.is_free,
        }
    }
}

/// Validates the API base URL before any client is built.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    if base_url.trim().is_empty() {
        return Err(anyhow!("API base URL cannot be empty"));
    }

    let parsed = Url::parse(base_url)
        .map_err(|e| anyhow!("Invalid API base URL '{}': {}", base_url, e))?;

    if parsed.scheme() != "https" && parsed.scheme() != "http" {
        return Err(anyhow!(
            "API base URL must use http or https, got '{}://'",
            parsed.scheme()
        ));
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(anyhow!(
            "API base URL must have a host: '{}'",
            base_url
        ));
    }

    Ok(())
}

/// Client for the remote collaborator that persists calendar sync state.
///
/// Both operations treat any non-success status as failure; the caller owns
/// optimistic state and rollback.
#[derive(Debug, Clone)]
pub struct AvailabilityClient {
    client: Client,
    base_url: String,
}

impl AvailabilityClient {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        let client = HttpConfig::availability_api().build_client()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, AVAILABILITY_CALENDAR_PATH)
    }

    /// Enable sync: POST the payload as a JSON body.
    pub async fn add_selected_calendar(
        &self,
        payload: &SelectedCalendarPayload,
    ) -> AppResult<()> {
        debug!(
            "[Availability] POST {} for calendar '{}'",
            AVAILABILITY_CALENDAR_PATH, payload.external_id
        );
        let response = self
            .client
            .post(self.endpoint())
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::api(response.status()));
        }
        Ok(())
    }

    /// Disable sync: DELETE with the same fields encoded as query parameters.
    pub async fn remove_selected_calendar(
        &self,
        payload: &SelectedCalendarPayload,
    ) -> AppResult<()> {
        debug!(
            "[Availability] DELETE {} for calendar '{}'",
            AVAILABILITY_CALENDAR_PATH, payload.external_id
        );
        let response = self
            .client
            .delete(self.endpoint())
            .query(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::api(response.status()));
        }
        Ok(())
    }
}
