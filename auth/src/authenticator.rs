use chrono::Duration;

use crate::jwt::AccessTokenCodec;
use crate::jwt::AccessTokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and access token handling.
///
/// Built once at startup from the signing secret and issuer, then shared read-only.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_tokens: AccessTokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(PasswordError),

    #[error("Access token error: {0}")]
    AccessToken(#[from] AccessTokenError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::Password(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    /// * `issuer` - Issuer written to and required in every access token
    pub fn new(jwt_secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            access_tokens: AccessTokenCodec::new(jwt_secret, issuer),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash unreadable or verification failed internally
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        self.password_hasher
            .verify(stored_hash, password)
            .map_err(AuthenticationError::from)
    }

    /// Issue an access token for `subject` valid for `ttl`.
    ///
    /// Callers must have authenticated the subject already (password or refresh token).
    pub fn issue_access_token(
        &self,
        subject: impl ToString,
        ttl: Duration,
    ) -> Result<String, AccessTokenError> {
        self.access_tokens.issue(subject, ttl)
    }

    /// Validate an access token and return its subject.
    pub fn validate_access_token(&self, token: &str) -> Result<String, AccessTokenError> {
        self.access_tokens.validate(token)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Performs the same password work as `verify_password` and returns
    /// `InvalidCredentials`, or `Password` if verification failed internally.
    /// Never reports success.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        match self.password_hasher.verify_unknown_account(password) {
            Ok(()) | Err(PasswordError::Mismatch) => AuthenticationError::InvalidCredentials,
            Err(other) => AuthenticationError::Password(other),
        }
    }
}
