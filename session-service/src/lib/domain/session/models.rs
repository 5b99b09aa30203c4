use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Lifetime of every access token, in hours.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 1;

/// Lifetime of every refresh token counted from issuance, in days.
pub const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 60;

pub fn access_token_ttl() -> Duration {
    Duration::hours(ACCESS_TOKEN_TTL_HOURS)
}

pub fn refresh_token_lifetime() -> Duration {
    Duration::days(REFRESH_TOKEN_LIFETIME_DAYS)
}

/// Persisted refresh token record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Expired from the exact instant of `expires_at` onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Identifier of a player's save record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaveId(pub Uuid);

impl fmt::Display for SaveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Credentials handed out by a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    /// `None` for a player that has never saved.
    pub save_id: Option<SaveId>,
}

/// Result of exchanging a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub access_token: String,
}
