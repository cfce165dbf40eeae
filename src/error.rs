//! Shared error plumbing.

/// Grepable error code and retryable flag for user-facing error reports.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Structured error report printed by the CLI.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ErrorReport {
    /// Build a report from any typed error.
    #[must_use]
    pub fn from_error(err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
