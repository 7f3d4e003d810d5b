use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-side check failed before any request was issued.
    #[error("{0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    InvalidForm(#[from] validator::ValidationErrors),

    #[error("API error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
        /// Raw response body, kept for endpoints that answer with extra flags.
        details: serde_json::Value,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 401 that cleared the stored credentials, with the backend's message if any.
    #[error("Session expired, please log in again")]
    SessionExpired(Option<String>),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        Self::api_with_details(status, message, serde_json::Value::Null)
    }

    pub fn api_with_details(
        status: StatusCode,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Error::Api {
            status,
            message: message.into(),
            details,
        }
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Error::Api { details, .. } if !details.is_null() => Some(details),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Unauthorized(_) | Error::SessionExpired(_) => Some(StatusCode::UNAUTHORIZED),
            Error::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Text shown to the operator in an error toast.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::InvalidForm(errors) => first_validation_message(errors)
                .unwrap_or_else(|| errors.to_string()),
            Error::Api { message, .. } | Error::Unauthorized(message) => {
                if message.trim().is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    message.clone()
                }
            }
            Error::SessionExpired(message) => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| self.to_string()),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Field rules are reported before struct-level (`__all__`) rules.
fn first_validation_message(errors: &validator::ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| (a.0 == "__all__", &a.0).cmp(&(b.0 == "__all__", &b.0)));
    fields.into_iter().find_map(|(field, errs)| {
        errs.first().map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field))
        })
    })
}
