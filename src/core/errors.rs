use http::header::CONTENT_TYPE;
use spin_sdk::http::Response;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::InternalError(_) => 500,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg) | ApiError::InternalError(msg) => msg,
        }
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        let body = serde_json::json!({"error": err.message()}).to_string();
        Response::builder()
            .status(err.status())
            .header(CONTENT_TYPE.as_str(), "application/json")
            .body(body.into_bytes())
            .build()
    }
}

// Internal failures are logged here; the client only sees a generic message.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        ApiError::InternalError("Internal server error".to_string())
    }
}
