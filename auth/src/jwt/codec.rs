use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::AccessTokenError;

/// Issues and validates signed, stateless access tokens.
///
/// Tokens are compact JWTs signed with HS256. The signing secret and the issuer
/// are fixed at construction and never change for the lifetime of the codec.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    algorithm: Algorithm,
}

impl AccessTokenCodec {
    /// Create a new codec.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret
    /// * `issuer` - Value written to and required in the `iss` claim
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `subject`, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString, ttl: Duration) -> Result<String, AccessTokenError> {
        self.issue_at(subject, ttl, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `issued_at` (Unix seconds).
    pub fn issue_at(
        &self,
        subject: impl ToString,
        ttl: Duration,
        issued_at: i64,
    ) -> Result<String, AccessTokenError> {
        let claims = Claims::new(self.issuer.as_str(), subject, issued_at, ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AccessTokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed or lacks a required claim
    /// * `InvalidSignature` - MAC does not match this codec's secret
    /// * `IssuerMismatch` - `iss` differs from this codec's issuer
    /// * `Expired` - Current time is at or past `exp`
    pub fn validate(&self, token: &str) -> Result<String, AccessTokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token against an explicit current time (Unix seconds).
    ///
    /// The signature is verified before any claim is inspected.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<String, AccessTokenError> {
        let claims = self.verify_signature(token)?;

        if claims.iss != self.issuer {
            return Err(AccessTokenError::IssuerMismatch);
        }

        if claims.is_expired(now) {
            return Err(AccessTokenError::Expired);
        }

        Ok(claims.sub)
    }

    fn verify_signature(&self, token: &str) -> Result<Claims, AccessTokenError> {
        // Only signature and structure here; issuer and expiry are checked by the caller
        // so that the exact-`exp` boundary has no leeway.
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AccessTokenError::InvalidSignature
                }
                _ => AccessTokenError::Malformed(e.to_string()),
            })
    }
}
