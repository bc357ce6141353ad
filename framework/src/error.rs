//! Framework-wide error types
//!
//! Every fallible framework call returns [`FrameworkError`]. It carries enough
//! information to pick an HTTP status code, so controllers can use `?` and
//! let the error render itself as a JSON response.

use std::collections::HashMap;
use thiserror::Error;

/// Ad-hoc domain error with an explicit HTTP status
///
/// # Example
///
/// ```rust,ignore
/// use tally::{AppError, FrameworkError};
///
/// fn check(page: u64) -> Result<(), FrameworkError> {
///     if page == 0 {
///         return Err(AppError::bad_request("page starts at 1").into());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AppError {
    message: String,
    status_code: u16,
}

impl AppError {
    /// Create a new AppError with status 500
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: 500,
        }
    }

    pub fn status(mut self, code: u16) -> Self {
        self.status_code = code;
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message).status(404)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message).status(400)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message).status(401)
    }

    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(message).status(504)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for FrameworkError {
    fn from(e: AppError) -> Self {
        FrameworkError::Domain {
            message: e.message,
            status_code: e.status_code,
        }
    }
}

/// Field-keyed validation messages
///
/// Rendered as:
///
/// ```json
/// {
///     "message": "The given data was invalid.",
///     "errors": { "page": ["page must be at least 1"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error for a specific field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded for one field, empty if the field passed
    pub fn field(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Convert from the validator crate's error tree
    pub fn from_validator(errors: validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
                result.add(field.to_string(), message);
            }
        }
        result
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "message": "The given data was invalid.",
            "errors": self.errors
        })
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: {:?}", self.errors)
    }
}

impl std::error::Error for ValidationErrors {}

impl From<validator::ValidationErrors> for FrameworkError {
    fn from(errors: validator::ValidationErrors) -> Self {
        FrameworkError::Validation(ValidationErrors::from_validator(errors))
    }
}

/// Framework-wide error type
///
/// `From<FrameworkError> for HttpResponse` lives in the http module, so a
/// handler returning [`crate::Response`] can propagate any of these with `?`.
#[derive(Debug, Clone, Error)]
pub enum FrameworkError {
    /// Route parameter missing from the matched path
    #[error("Missing required parameter: {param_name}")]
    ParamError { param_name: String },

    /// Path or query parameter could not be parsed
    #[error("Invalid parameter '{param}': expected {expected_type}")]
    ParamParse {
        param: String,
        expected_type: &'static str,
    },

    /// Query string did not deserialize into the requested type
    #[error("Invalid query string: {0}")]
    Query(String),

    /// Field validation errors (422)
    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {message}")]
    Internal { message: String },

    /// Domain/application error with custom status code
    #[error("{message}")]
    Domain { message: String, status_code: u16 },

    /// Missing or rejected bearer token (401)
    #[error("Unauthenticated.")]
    Unauthenticated,

    #[error("{model_name} not found")]
    ModelNotFound { model_name: String },
}

impl FrameworkError {
    pub fn param(name: impl Into<String>) -> Self {
        Self::ParamError {
            param_name: name.into(),
        }
    }

    pub fn param_parse(param: impl Into<String>, expected_type: &'static str) -> Self {
        Self::ParamParse {
            param: param.into(),
            expected_type,
        }
    }

    /// Single-field validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn domain(message: impl Into<String>, status_code: u16) -> Self {
        Self::Domain {
            message: message.into(),
            status_code,
        }
    }

    pub fn model_not_found(name: impl Into<String>) -> Self {
        Self::ModelNotFound {
            model_name: name.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ParamError { .. } => 400,
            Self::ParamParse { .. } => 400,
            Self::Query(_) => 400,
            Self::Validation(_) => 422,
            Self::Database(_) => 500,
            Self::Internal { .. } => 500,
            Self::Domain { status_code, .. } => *status_code,
            Self::Unauthenticated => 401,
            Self::ModelNotFound { .. } => 404,
        }
    }
}

impl From<sea_orm::DbErr> for FrameworkError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}
