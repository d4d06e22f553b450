//! Student token verification.
//!
//! Verifies a JWT's signature with the configured key, then checks its
//! expiry against a caller-supplied instant.
//!
//! # Post-conditions
//! - On success, returns the decoded `TokenClaims`.
//! - On failure, returns a `JwtError` naming what went wrong.
//!
//! # Invariants
//! - `TokenClaims` is only ever produced from a token whose signature
//!   verified against the supplied key.
//! - Verification is stateless; the same inputs give the same output.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use super::VerificationKey;

/// Claims decoded from a verified student token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Whether the holder is a student. Absent means not a student.
    pub student: bool,
    /// Expiry, in whole seconds since Unix epoch.
    pub exp: u64,
}

/// 2^64: the first value that no longer fits a `u64`.
const EXP_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Payload as it comes off the wire.
///
/// `exp` is a JSON number and providers may mint it with a fractional part.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    student: bool,
    exp: Option<f64>,
}

impl TryFrom<RawClaims> for TokenClaims {
    type Error = JwtError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let exp = raw
            .exp
            .ok_or_else(|| JwtError::MissingClaim("exp".to_string()))?;
        if !exp.is_finite() || exp < 0.0 || exp >= EXP_LIMIT {
            return Err(JwtError::MalformedToken);
        }
        // Flooring keeps `exp < now` exact, since `now` is whole seconds.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let exp = exp.floor() as u64;
        Ok(Self {
            student: raw.student,
            exp,
        })
    }
}

/// Error returned when JWT verification fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    /// No token was presented.
    MissingToken,
    /// The JWT signature is invalid.
    InvalidSignature,
    /// The JWT has expired.
    TokenExpired,
    /// The JWT is malformed or cannot be parsed.
    MalformedToken,
    /// A required claim is missing from the JWT.
    MissingClaim(String),
    /// The decoding key could not be created from the configured material.
    InvalidKey(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => write!(f, "no JWT presented"),
            Self::InvalidSignature => write!(f, "invalid JWT signature"),
            Self::TokenExpired => write!(f, "JWT has expired"),
            Self::MalformedToken => write!(f, "malformed JWT"),
            Self::MissingClaim(claim) => write!(f, "missing '{claim}' claim in JWT"),
            Self::InvalidKey(reason) => write!(f, "invalid key: {reason}"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Verifies a JWT and returns its claims.
///
/// # Arguments
/// * `token` - The JWT string to verify.
/// * `key` - The key the token must be signed with.
/// * `now_secs` - The verification instant, in seconds since Unix epoch.
///
/// # Errors
/// Returns `JwtError` if verification fails for any reason. A token whose
/// `exp` is earlier than `now_secs` is `TokenExpired`.
pub fn verify_token(
    token: &str,
    key: &VerificationKey,
    now_secs: u64,
) -> Result<TokenClaims, JwtError> {
    if token.is_empty() {
        return Err(JwtError::MissingToken);
    }

    let (decoding_key, algorithm) = match key {
        VerificationKey::Hs256 { secret } => (DecodingKey::from_secret(secret), Algorithm::HS256),
        VerificationKey::Rs256 { public_key } => (
            DecodingKey::from_rsa_pem(public_key.as_bytes())
                .map_err(|e| JwtError::InvalidKey(e.to_string()))?,
            Algorithm::RS256,
        ),
    };

    let claims = decode_claims(token, &decoding_key, &validation(algorithm))?;

    if claims.exp < now_secs {
        return Err(JwtError::TokenExpired);
    }

    Ok(claims)
}

/// Validation rules for a single algorithm.
///
/// Expiry is checked by `verify_token` against the injected instant rather
/// than by `jsonwebtoken` against the system clock. Presence of `exp` is
/// enforced by `RawClaims`, which unlike `jsonwebtoken` accepts fractional
/// values.
fn validation(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_required_spec_claims::<&str>(&[]);
    validation
}

fn decode_claims(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> Result<TokenClaims, JwtError> {
    let raw = decode::<RawClaims>(token, key, validation)
        .map(|token_data| token_data.claims)
        .map_err(map_jwt_error)?;
    TokenClaims::try_from(raw)
}

/// Maps jsonwebtoken errors to our JwtError type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> JwtError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
        _ => JwtError::MalformedToken,
    }
}
