// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps service errors → HTTP-style responses
// - Provides consistent error format for callers
// - Never exposes internal implementation details

use serde::{Deserialize, Serialize};
use crate::domain::DomainError;
use crate::error::{AppError, ServiceError};

/// Standard error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub status: u16,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Request failed validation (400)
    Validation,

    /// Unique index conflict (400)
    Duplicate,

    /// Lookup term matched nothing (404)
    NotFound,

    /// Operation target does not exist (400)
    InvalidRequest,

    /// Storage or other server fault (500)
    Internal,
}

impl ErrorType {
    pub fn status(self) -> u16 {
        match self {
            ErrorType::Validation | ErrorType::Duplicate | ErrorType::InvalidRequest => 400,
            ErrorType::NotFound => 404,
            ErrorType::Internal => 500,
        }
    }
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            status: error_type.status(),
            message,
            details,
        }
    }

    /// Create error response from ServiceError
    pub fn from_service_error(error: ServiceError) -> Self {
        let message = error.to_string();
        match error {
            ServiceError::Duplicate { .. } => Self::new(ErrorType::Duplicate, message, None),
            ServiceError::NotFound { .. } => Self::new(ErrorType::NotFound, message, None),
            ServiceError::InvalidRequest { .. } => {
                Self::new(ErrorType::InvalidRequest, message, None)
            }
            // Already logged by the service with its cause chain
            ServiceError::Internal { .. } => Self::new(
                ErrorType::Internal,
                message,
                Some("Check logs for details".to_string()),
            ),
        }
    }

    /// Infrastructure failures outside a record operation
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Domain(domain_error) => Self::from_domain_error(domain_error),
            other => {
                log::error!("Internal failure: {}", other);
                Self::new(
                    ErrorType::Internal,
                    "Internal server error".to_string(),
                    Some("Check logs for details".to_string()),
                )
            }
        }
    }

    pub fn from_domain_error(error: DomainError) -> Self {
        Self::new(
            ErrorType::Validation,
            "Request validation failed".to_string(),
            Some(error.to_string()),
        )
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, ServiceError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_service_error)
    }
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

impl<T> ToErrorResponse<T> for Result<T, DomainError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_domain_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyValue;
    use uuid::Uuid;

    #[test]
    fn test_duplicate_is_bad_request_with_key_value() {
        let error = ErrorResponse::from_service_error(ServiceError::Duplicate {
            key_value: KeyValue::new("name", "bulbasaur"),
        });
        assert_eq!(error.error_type, ErrorType::Duplicate);
        assert_eq!(error.status, 400);
        assert_eq!(error.message, r#"Pokemon exists in db {"name":"bulbasaur"}"#);
    }

    #[test]
    fn test_not_found_is_404() {
        let error = ErrorResponse::from_service_error(ServiceError::NotFound {
            term: "mew".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.status, 404);
        assert!(error.message.contains("\"mew\""));
    }

    #[test]
    fn test_invalid_request_is_400() {
        let id = Uuid::new_v4();
        let error = ErrorResponse::from_service_error(ServiceError::InvalidRequest { id });
        assert_eq!(error.status, 400);
        assert_eq!(error.message, format!("Pokemon with id {} not found", id));
    }

    #[test]
    fn test_internal_hides_cause() {
        let error = ErrorResponse::from_service_error(ServiceError::internal(AppError::Pool(
            "secret connection string".to_string(),
        )));
        assert_eq!(error.error_type, ErrorType::Internal);
        assert_eq!(error.status, 500);
        assert!(!error.message.contains("secret"));
        assert!(!error.details.unwrap_or_default().contains("secret"));
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Invalid input".to_string());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.status, 400);
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from_service_error(ServiceError::NotFound {
            term: "mew".to_string(),
        });
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("404"));
    }
}
