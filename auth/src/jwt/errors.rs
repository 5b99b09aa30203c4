use thiserror::Error;

/// Error type for access token operations.
///
/// Validation failures are reported in the order they are checked:
/// structure, signature, issuer, expiry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token issuer does not match")]
    IssuerMismatch,

    #[error("Token is expired")]
    Expired,
}
