//! Failure type shared by every resource client.
//!
//! Callers render an `ApiError` with `Display`. For rejected requests that is
//! exactly the (possibly translated) message the backend sent, so front ends
//! never need to look inside the variant to show something useful.

use super::ports::{KeyValueStoreError, define_port_error};

define_port_error! {
    /// Errors surfaced by resource client operations.
    pub enum ApiError {
        /// The request never produced an HTTP response.
        Transport { message: String } =>
            "request failed: {message}",
        /// The backend answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "{message}",
        /// A success response did not match the expected shape.
        Decode { message: String } =>
            "unexpected response: {message}",
        /// Session storage failed while preparing or finishing the request.
        Storage { message: String } =>
            "session storage failed: {message}",
    }
}

impl ApiError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<KeyValueStoreError> for ApiError {
    fn from(value: KeyValueStoreError) -> Self {
        Self::storage(value.to_string())
    }
}

/// Convenient result alias for resource client operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_is_the_bare_message() {
        let err = ApiError::rejected(401_u16, "Invalid email or password");
        assert_eq!(err.to_string(), "Invalid email or password");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn storage_errors_convert() {
        let err: ApiError = KeyValueStoreError::io("read-only").into();
        assert_eq!(
            err.to_string(),
            "session storage failed: storage unavailable: read-only"
        );
        assert_eq!(err.status(), None);
    }
}
