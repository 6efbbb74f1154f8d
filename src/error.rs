use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Availability API returned HTTP {status}")]
    Api { status: reqwest::StatusCode },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn api(status: reqwest::StatusCode) -> Self {
        Self::Api { status }
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True when the failure came from the remote API or the transport,
    /// i.e. the error class the toggle rolls back for.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;
