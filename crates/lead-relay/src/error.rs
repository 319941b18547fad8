use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Name or phone missing from the submission
    #[error("name and phone are required")]
    MissingFields,
    /// Inbound body is not a JSON lead object
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    /// CRM_AUTH_KEY not configured
    #[error("CRM auth key is not configured")]
    MissingAuthKey,
    /// CRM answered with a body that is not JSON
    #[error("invalid CRM response: {0}")]
    InvalidCrmResponse(String),
    /// CRM answered with a non-2xx status
    #[error("CRM rejected lead with status {status}")]
    CrmRejected {
        status: u16,
        details: serde_json::Value,
    },
    /// Anything else: transport failures, unreadable bodies
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Client-facing message. Never includes upstream transport detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MissingFields => "Name and phone are required",
            RelayError::InvalidBody(_) => "Invalid request body",
            RelayError::MissingAuthKey => "Server configuration error",
            RelayError::InvalidCrmResponse(_) => "Invalid CRM response",
            RelayError::CrmRejected { .. } => "Failed to create lead in CRM",
            RelayError::Internal(_) => "Internal server error",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        // Strip the URL so the auth key in the query never reaches a log line
        RelayError::Internal(e.without_url().to_string())
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingFields | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            RelayError::MissingFields => {
                tracing::warn!("Rejected lead: name and phone are required")
            }
            RelayError::InvalidBody(msg) => tracing::warn!("Rejected lead body: {}", msg),
            RelayError::MissingAuthKey => {
                tracing::error!("CRM_AUTH_KEY missing in environment variables")
            }
            RelayError::InvalidCrmResponse(msg) => {
                tracing::error!("Error parsing CRM response: {}", msg)
            }
            RelayError::CrmRejected { status, details } => {
                tracing::error!(status, %details, "CRM returned error")
            }
            RelayError::Internal(msg) => tracing::error!("Unexpected server error: {}", msg),
        }

        let mut body = serde_json::json!({
            "success": false,
            "error": self.public_message(),
        });
        if let RelayError::CrmRejected { details, .. } = self {
            body["details"] = details.clone();
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}
