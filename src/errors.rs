use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failure while asking the remote service for a day's timings.
///
/// Never leaves the provider; it only decides which fallback tier is used.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("prayer API request failed: {0}")]
    Request(String),

    #[error("prayer API returned status {status}")]
    Status { status: u16 },

    #[error("prayer API response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode store contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why an adhan alert step did not happen. Logged, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlertError {
    #[error("adhan playback failed: {0}")]
    Playback(String),

    #[error("notification failed: {0}")]
    Notification(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day {input:?}, expected HH:MM")]
pub struct TimeParseError {
    pub input: String,
}

impl TimeParseError {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}
