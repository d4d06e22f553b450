//! Key material used to verify student tokens.
//!
//! # Pre-conditions
//! - If built through the constructors, the key material is usable.
//!
//! # Post-conditions
//! - `VerificationKey` instances are immutable once created.
//!
//! # Invariants
//! - `VerificationKey::Hs256` secrets are never empty.
//! - `VerificationKey::Rs256` public keys are valid PEM-encoded RSA public keys.

use jsonwebtoken::DecodingKey;

/// Error returned when verification key material is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationKeyError {
    /// The HS256 secret is empty.
    EmptySecret,
    /// The RS256 public key is not a valid PEM-encoded RSA public key.
    InvalidRs256PublicKey(String),
    /// The algorithm name is not one we verify with.
    UnsupportedAlgorithm(String),
}

impl std::fmt::Display for VerificationKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "HS256 secret must not be empty"),
            Self::InvalidRs256PublicKey(reason) => {
                write!(f, "invalid RS256 public key: {reason}")
            }
            Self::UnsupportedAlgorithm(name) => {
                write!(f, "unsupported JWT algorithm '{name}' (expected RS256 or HS256)")
            }
        }
    }
}

impl std::error::Error for VerificationKeyError {}

/// Token verification key.
///
/// The authentication provider signs with RSA, so `Rs256` is the production
/// shape. `Hs256` covers shared-secret deployments.
#[derive(Debug, Clone)]
pub enum VerificationKey {
    /// HMAC-SHA256 shared secret.
    Hs256 {
        /// The shared secret used for HMAC-SHA256.
        secret: Vec<u8>,
    },
    /// RSA-SHA256 public key.
    Rs256 {
        /// PEM-encoded RSA public key.
        public_key: String,
    },
}

impl VerificationKey {
    /// Create a new HS256 verification key.
    ///
    /// # Errors
    /// Returns `VerificationKeyError::EmptySecret` if the secret is empty.
    pub fn new_hs256(secret: Vec<u8>) -> Result<Self, VerificationKeyError> {
        if secret.is_empty() {
            return Err(VerificationKeyError::EmptySecret);
        }
        Ok(Self::Hs256 { secret })
    }

    /// Create a new RS256 verification key.
    ///
    /// # Errors
    /// Returns `VerificationKeyError::InvalidRs256PublicKey` if the key is not a valid RS256 PEM key.
    pub fn new_rs256(public_key: String) -> Result<Self, VerificationKeyError> {
        DecodingKey::from_rsa_pem(public_key.as_bytes())
            .map_err(|e| VerificationKeyError::InvalidRs256PublicKey(e.to_string()))?;

        Ok(Self::Rs256 { public_key })
    }

    /// Build a key from an algorithm name and raw key material.
    ///
    /// `algorithm` is matched case-insensitively. For `HS256` the material is
    /// the secret's UTF-8 bytes; for `RS256` it is a PEM public key.
    pub fn from_parts(algorithm: &str, material: &str) -> Result<Self, VerificationKeyError> {
        if algorithm.eq_ignore_ascii_case("RS256") {
            Self::new_rs256(material.to_string())
        } else if algorithm.eq_ignore_ascii_case("HS256") {
            Self::new_hs256(material.as_bytes().to_vec())
        } else {
            Err(VerificationKeyError::UnsupportedAlgorithm(
                algorithm.to_string(),
            ))
        }
    }

    /// Name of the signing algorithm, as it appears in a JWT header.
    #[must_use]
    pub const fn algorithm_name(&self) -> &'static str {
        match self {
            Self::Hs256 { .. } => "HS256",
            Self::Rs256 { .. } => "RS256",
        }
    }
}
