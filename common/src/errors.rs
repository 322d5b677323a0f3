// Error types for the update pipeline

use thiserror::Error;

/// Secret resolution errors
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Metadata server token request failed: {0}")]
    TokenRequestFailed(String),

    #[error("Metadata server response missing access_token field")]
    TokenMissing,

    #[error("Secret store request failed: {0}")]
    StoreUnreachable(String),

    #[error("Secret version access failed with status {status}: {body}")]
    AccessDenied { status: u16, body: String },

    #[error("Secret payload is not valid base64: {0}")]
    PayloadNotBase64(String),

    #[error("Secret payload does not parse as credentials: {0}")]
    MalformedCredentials(String),
}

/// Event source (Mobilize API) errors
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Events request failed: {0}")]
    RequestFailed(String),

    #[error("Events request failed with status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Events response body did not decode: {0}")]
    MalformedBody(String),

    #[error("Timeslot {slot_id} carries an unrepresentable timestamp: {epoch}")]
    InvalidTimestamp { slot_id: u64, epoch: i64 },
}

/// Forum posting errors
#[derive(Error, Debug)]
pub enum PostError {
    #[error("Bot session creation failed: {0}")]
    SessionCreationFailed(String),

    #[error("Link submission request failed: {0}")]
    SubmissionRequestFailed(String),

    #[error("Link submission rejected for '{title}': {reason}")]
    SubmissionRejected { title: String, reason: String },
}

/// Date window calculation errors
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Local midnight {0} is unrepresentable in timezone {1}")]
    UnrepresentableMidnight(String, String),
}

/// Sum of everything that can abort one trigger invocation.
///
/// The 403 untrusted-caller path is handled in middleware and never
/// reaches this type; every variant here surfaces as a server error.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Secrets(#[from] SecretError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Post(#[from] PostError),

    #[error(transparent)]
    Window(#[from] WindowError),
}

impl UpdateError {
    /// Stable machine-readable category for the API error body.
    pub fn category(&self) -> &'static str {
        match self {
            UpdateError::Secrets(_) => "secret_resolution_failed",
            UpdateError::Source(_) => "source_fetch_failed",
            UpdateError::Post(_) => "post_submission_failed",
            UpdateError::Window(_) => "window_calculation_failed",
        }
    }
}
