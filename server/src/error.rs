//! Error code contract shared by every failure the viewer reports.
//!
//! DESIGN
//! ======
//! Each error enum maps its variants to a stable, grepable code and a
//! retryable flag. JSON responses carry both next to the display message so
//! clients branch on the code and never on message text.

use serde::{Deserialize, Serialize};

/// Standard error contract: grepable code plus retryability.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// JSON error payload on API routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl ErrorBody {
    pub fn from_error(err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { code: err.error_code().to_string(), message: err.to_string(), retryable: err.retryable() }
    }
}
