//! Signed token payload.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::TokenValidity;
use crate::errors::ValidationError;

/// Session key under which the last issued claims are mirrored
pub const SESSION_PAYLOAD_KEY: &str = "payload";

/// Claims structure for the token payload
///
/// A claims value is never modified after construction; refreshing builds a
/// new value through [`TokenClaims::renewed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims<I> {
    /// The authenticated subject, opaque to this crate
    pub identity: I,

    /// Expiration timestamp (unix seconds)
    pub exp: i64,

    /// Issued at timestamp (unix seconds)
    pub iat: i64,
}

impl<I> TokenClaims<I> {
    /// Creates claims issued at `now` and expiring `validity` later
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - claims with `exp` strictly after `now`
    /// * `Err(ValidationError)` - the expiry is not representable
    pub fn issue(
        identity: I,
        now: DateTime<Utc>,
        validity: TokenValidity,
    ) -> Result<Self, ValidationError> {
        let expires_at = now
            .checked_add_signed(validity.as_duration())
            .ok_or_else(|| ValidationError::InvalidDuration {
                input: validity.to_string(),
            })?;

        Ok(Self {
            identity,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Creates new claims for the same identity with a recomputed expiry
    pub fn renewed(&self, now: DateTime<Utc>, validity: TokenValidity) -> Result<Self, ValidationError>
    where
        I: Clone,
    {
        Self::issue(self.identity.clone(), now, validity)
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Whether the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Seconds left before expiry at `now`, zero once expired
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.exp - now.timestamp()).max(0)
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn into_identity(self) -> I {
        self.identity
    }
}
