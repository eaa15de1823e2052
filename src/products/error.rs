use thiserror::Error;

/// Message shown when a failure carries no usable text
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Failures of a single product fetch attempt.
///
/// These never escape [`ProductsController::fetch_products`]; they are turned
/// into the `error` string of the fetch state and reported to telemetry.
///
/// [`ProductsController::fetch_products`]: crate::products::ProductsController::fetch_products
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("Failed to fetch products: {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// Request never completed at the transport level, or the body could not be read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not valid JSON, or an array element was not a product
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// Configured base URL cannot be resolved
    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
        }
    }

    /// HTTP status obtained before the failure, if the request got that far
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Human-readable message for the UI
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}
