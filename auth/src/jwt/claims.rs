use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an access token.
///
/// All four registered claims are required; a token missing any of them does not decode.
/// Timestamps are Unix epoch seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (authenticated user identifier)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject` issued at `issued_at` and valid for `ttl`.
    pub fn new(
        issuer: impl Into<String>,
        subject: impl ToString,
        issued_at: i64,
        ttl: Duration,
    ) -> Self {
        Self {
            iss: issuer.into(),
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is already expired at the exact second of `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
