//! The student authentication check.
//!
//! Decides whether a request's cookies carry a valid student token.
//!
//! # Invariants
//! - Claims are only inspected after `verify_token` succeeded for the exact
//!   token in the current cookie jar.
//! - Every failure collapses to `AuthDecision::Deny`; the reason is logged,
//!   never returned to the client.

use std::sync::Arc;

use axum_extra::extract::CookieJar;

use super::VerificationKey;
use super::jwt::{JwtError, verify_token};
use crate::time::{SystemTimeSource, TimeSource};

/// Name of the cookie carrying the student token.
pub const JWT_COOKIE_NAME: &str = "jwt";

/// Outcome of the authentication check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny,
}

/// Reason a token was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// Verification failed (absent token, bad signature, expiry, ...).
    Verification(JwtError),
    /// No verification key is configured, so no token can verify.
    NoVerificationKey,
    /// The token verified but its `student` claim is not `true`.
    NotStudent,
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verification(e) => write!(f, "{e}"),
            Self::NoVerificationKey => write!(f, "no verification key configured"),
            Self::NotStudent => write!(f, "token holder is not a student"),
        }
    }
}

/// Student authentication check.
///
/// Holds the immutable auth settings and a clock; carries no per-request
/// state, so one instance is shared by every request.
#[derive(Clone)]
pub struct AuthCheck {
    enabled: bool,
    key: Option<VerificationKey>,
    time_source: Arc<dyn TimeSource>,
}

impl std::fmt::Debug for AuthCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCheck")
            .field("enabled", &self.enabled)
            .field("algorithm", &self.key.as_ref().map(VerificationKey::algorithm_name))
            .finish_non_exhaustive()
    }
}

impl AuthCheck {
    /// Create a check that reads the system clock.
    #[must_use]
    pub fn new(enabled: bool, key: Option<VerificationKey>) -> Self {
        Self::with_time_source(enabled, key, Arc::new(SystemTimeSource))
    }

    #[must_use]
    pub fn with_time_source(
        enabled: bool,
        key: Option<VerificationKey>,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            enabled,
            key,
            time_source,
        }
    }

    /// Whether the check is active. A disabled check allows everything.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Decide whether the cookies grant access.
    #[must_use]
    pub fn check(&self, cookies: &CookieJar) -> AuthDecision {
        let token = cookies.get(JWT_COOKIE_NAME).map(|cookie| cookie.value());
        match self.evaluate(token) {
            Ok(()) => AuthDecision::Allow,
            Err(reason) => {
                tracing::debug!(%reason, "student auth denied");
                AuthDecision::Deny
            }
        }
    }

    /// Run the check on a raw token, keeping the deny reason.
    ///
    /// # Errors
    /// Returns the `DenyReason` for any outcome other than allow.
    pub fn evaluate(&self, token: Option<&str>) -> Result<(), DenyReason> {
        if !self.enabled {
            return Ok(());
        }

        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(DenyReason::Verification(JwtError::MissingToken)),
        };

        let key = self.key.as_ref().ok_or(DenyReason::NoVerificationKey)?;
        let claims = verify_token(token, key, self.time_source.now_secs())
            .map_err(DenyReason::Verification)?;

        if !claims.student {
            return Err(DenyReason::NotStudent);
        }

        Ok(())
    }
}
