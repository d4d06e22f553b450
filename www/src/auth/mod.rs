//! Student authentication.
//!
//! This module verifies the `jwt` cookie issued by the external
//! authentication provider and decides whether a request may enter the
//! authenticated zone.
//!
//! # Post-conditions
//! - Authentication settings are immutable once loaded.
//!
//! # Invariants
//! - Token claims are never trusted before signature verification.

pub mod check;
pub mod jwt;
pub mod verification_key;

pub use check::{AuthCheck, AuthDecision, DenyReason, JWT_COOKIE_NAME};
pub use jwt::{JwtError, TokenClaims, verify_token};
pub use verification_key::{VerificationKey, VerificationKeyError};
