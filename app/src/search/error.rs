use std::time::Duration;

use sea_orm::DbErr;
use tally::{AppError, FrameworkError};
use thiserror::Error;

/// Why a search produced no page
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rejected before any query ran
    #[error("invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    #[error("store failure: {0}")]
    Store(#[from] DbErr),

    #[error("search did not finish within {0:?}")]
    Timeout(Duration),
}

impl SearchError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }
}

impl From<SearchError> for FrameworkError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidArgument { field, message } => {
                FrameworkError::validation(field, message)
            }
            SearchError::Store(db) => FrameworkError::from(db),
            SearchError::Timeout(limit) => {
                AppError::gateway_timeout(format!("search did not finish within {:?}", limit))
                    .into()
            }
        }
    }
}
