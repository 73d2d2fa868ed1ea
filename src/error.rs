// HTTP API Error Types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseError;
use crate::page::PageError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError { code: &'static str, message: String },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { code, .. } => code,
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        let message = err.to_string();
        match err {
            PageError::NotFound(_) | PageError::SectionNotFound(_) => ApiError::not_found(message),
            PageError::DuplicateSlug(_) => ApiError::validation_error("DUPLICATE_SLUG", message),
            PageError::InvalidSectionType(_) => {
                ApiError::validation_error("INVALID_SECTION_TYPE", message)
            }
            PageError::InvalidSectionSettings(_) => {
                ApiError::validation_error("INVALID_SECTION_SETTINGS", message)
            }
            PageError::InvalidPage { .. } => ApiError::validation_error("VALIDATION_ERROR", message),
            PageError::UnknownSectionIds(_) => {
                ApiError::validation_error("UNKNOWN_SECTION_IDS", message)
            }
            PageError::Conflict { .. } => ApiError::conflict(message),
            PageError::Store(db_err) => db_err.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        if err.is_connection() {
            tracing::error!("Database unavailable: {}", err);
            return ApiError::service_unavailable("Database temporarily unavailable");
        }
        match err {
            DatabaseError::UniqueViolation(msg) => {
                ApiError::validation_error("DUPLICATE_SLUG", format!("Duplicate {}", msg))
            }
            other => {
                // Log the real error but return generic message
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_errors_map_to_statuses() {
        let cases = [
            (PageError::NotFound("home".into()), StatusCode::NOT_FOUND),
            (PageError::SectionNotFound("s1".into()), StatusCode::NOT_FOUND),
            (PageError::DuplicateSlug("home".into()), StatusCode::BAD_REQUEST),
            (PageError::InvalidSectionType("carousel".into()), StatusCode::BAD_REQUEST),
            (PageError::UnknownSectionIds(vec!["x".into()]), StatusCode::BAD_REQUEST),
            (PageError::Conflict { expected: 1, current: 2 }, StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn envelope_carries_message_and_code() {
        let body = ApiError::from(PageError::DuplicateSlug("about".into())).to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "DUPLICATE_SLUG");
        assert_eq!(body["message"], "A page with slug 'about' already exists");
    }

    #[test]
    fn database_errors_map_to_statuses() {
        let cases = [
            (DatabaseError::Sqlx(sqlx::Error::PoolClosed), StatusCode::SERVICE_UNAVAILABLE),
            (DatabaseError::UniqueViolation("slug 'home'".into()), StatusCode::BAD_REQUEST),
            (DatabaseError::ConfigMissing("DATABASE_URL"), StatusCode::INTERNAL_SERVER_ERROR),
            (DatabaseError::InvalidDatabaseUrl, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }
}
