use crate::entity_model::Violation;
use http::{Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {

    #[error("validation failed: [{}]", .0.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    Validation(Vec<Violation>),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {method} {path}")]
    Status { method: Method, path: String, status: StatusCode },

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("invalid wire date: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("save already in flight for {0}")]
    SaveInFlight(&'static str),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl AppError {
    pub fn new(msg: impl Into<String>) -> Self {
        AppError::Custom(msg.into())
    }

    /// Failures that leave the user on the form instead of escalating.
    pub fn is_local(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::SaveInFlight(_))
    }
}
