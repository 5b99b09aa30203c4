//! Authentication utilities library
//!
//! Provides the credential primitives used by the session service:
//! - Password hashing (Argon2id)
//! - Access tokens (HS256 JWT with `iss`, `sub`, `iat`, `exp`)
//! - Opaque refresh token generation
//! - Authentication coordination
//!
//! Nothing in this crate touches storage. Persisting and revoking refresh tokens is
//! the job of the service that owns the database.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").is_ok());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!", "clicker-game");
//! let token = codec.issue("user123", Duration::hours(1)).unwrap();
//! assert_eq!(codec.validate(&token).unwrap(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", "clicker-game");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue credentials
//! auth.verify_password("password123", &hash).unwrap();
//! let access_token = auth.issue_access_token("user123", Duration::hours(1)).unwrap();
//! let refresh_token = auth::refresh_token::generate();
//! assert_eq!(refresh_token.len(), 64);
//!
//! // Validate token
//! let subject = auth.validate_access_token(&access_token).unwrap();
//! assert_eq!(subject, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod refresh_token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::AccessTokenCodec;
pub use jwt::AccessTokenError;
pub use jwt::Claims;
pub use password::PasswordError;
pub use password::PasswordHasher;
