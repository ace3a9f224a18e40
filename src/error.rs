//! Error types for the ivsurf library.
//!
//! Fallible operations return `Result<T, IvSurfError>` rather than panicking.
//! Note that a quote whose implied volatility does not exist is *not* an
//! error: the solver reports it as `None` and the surface builder drops the
//! quote. Errors are reserved for misuse of the API — malformed
//! configuration, missing required fields, unparseable option types.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, IvSurfError>;

/// Errors that can occur during surface construction and quote handling.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IvSurfError {
    /// Input data or configuration is invalid (e.g., non-positive spot,
    /// inverted moneyness band, unknown option-type string).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_accessible() {
        let err = IvSurfError::InvalidInput {
            message: "spot must be positive".into(),
        };
        match &err {
            IvSurfError::InvalidInput { message } => {
                assert!(message.contains("positive"));
            }
        }
    }

    #[test]
    fn error_display_includes_message() {
        let err = IvSurfError::InvalidInput {
            message: "bad band".into(),
        };
        assert!(format!("{err}").contains("bad band"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IvSurfError>();
    }
}
