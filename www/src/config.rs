//! Server configuration module.
//!
//! This module loads the web server's configuration from environment
//! variables once at startup.
//!
//! # Environment Variables
//!
//! - `STUDENT_AUTH_ENABLED`: Enables the student authentication check (default: disabled)
//! - `STUDENT_AUTH_PATH`: Path prefix of the authenticated zone (default: unset, gates nothing)
//! - `JWT_PUBLIC_KEY`: Key material used to verify student tokens
//! - `JWT_ALGORITHM`: `RS256` or `HS256` (default: `RS256`)
//! - `AUTHORIZATION_URL`: URL of the external authentication provider
//! - `COMMON_DOMAIN`: Domain the bridged `jwt` cookie is scoped to
//! - `CDN_DOMAIN`: Domain clip media is served from
//! - `WWW_LISTEN_PORT`: Port to listen on (default: `3000`)
//!
//! # Invariants
//!
//! - Unset and empty variables are both read as "not configured"; neither is
//!   an error.
//! - Values that are present but unparsable are errors.

use crate::auth::VerificationKey;

/// Server configuration.
///
/// # Post-conditions
///
/// - Optional settings are `None` rather than empty strings.
/// - `verification_key`, when present, holds usable key material.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Whether the student authentication check is active.
    pub auth_enabled: bool,
    /// Requests whose path starts with this prefix go through the check.
    pub auth_path_prefix: Option<String>,
    /// Key that student tokens must be signed with.
    pub verification_key: Option<VerificationKey>,
    /// URL of the external authentication provider.
    pub authorization_url: Option<String>,
    /// `Domain` attribute of the bridged `jwt` cookie.
    pub common_domain: Option<String>,
    /// Domain clip media is served from.
    pub cdn_domain: Option<String>,
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default token algorithm.
    pub const DEFAULT_JWT_ALGORITHM: &'static str = "RS256";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `STUDENT_AUTH_ENABLED` is not a recognised boolean
    /// - `WWW_LISTEN_PORT` is not a valid port number
    /// - `JWT_ALGORITHM` or `JWT_PUBLIC_KEY` do not form a usable key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let auth_enabled = match var("STUDENT_AUTH_ENABLED") {
            Some(value) => parse_flag("STUDENT_AUTH_ENABLED", &value)?,
            None => false,
        };
        let verification_key = load_verification_key(
            var("JWT_ALGORITHM").as_deref(),
            var("JWT_PUBLIC_KEY").as_deref(),
        )?;
        let listen_port = match var("WWW_LISTEN_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "WWW_LISTEN_PORT".to_string(),
                message: format!("'{value}' is not a valid port number (must be 1-65535)"),
            })?,
            None => Self::DEFAULT_PORT,
        };

        Ok(Self {
            auth_enabled,
            auth_path_prefix: var("STUDENT_AUTH_PATH"),
            verification_key,
            authorization_url: var("AUTHORIZATION_URL"),
            common_domain: var("COMMON_DOMAIN"),
            cdn_domain: var("CDN_DOMAIN"),
            listen_port,
        })
    }

    /// Names of settings a deployment is expected to provide but doesn't.
    ///
    /// The server still runs without them; the affected feature is inert.
    #[must_use]
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.common_domain.is_none() {
            missing.push("COMMON_DOMAIN");
        }
        if self.auth_path_prefix.is_none() {
            missing.push("STUDENT_AUTH_PATH");
        }
        if self.cdn_domain.is_none() {
            missing.push("CDN_DOMAIN");
        }
        if self.auth_enabled {
            if self.verification_key.is_none() {
                missing.push("JWT_PUBLIC_KEY");
            }
            if self.authorization_url.is_none() {
                missing.push("AUTHORIZATION_URL");
            }
        }
        missing
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("'{value}' is not a boolean (use true or false)"),
        }),
    }
}

fn load_verification_key(
    algorithm: Option<&str>,
    material: Option<&str>,
) -> Result<Option<VerificationKey>, ConfigError> {
    let Some(material) = material else {
        return Ok(None);
    };
    let algorithm = algorithm.unwrap_or(ServerConfig::DEFAULT_JWT_ALGORITHM);

    // Keys passed through single-line env files arrive with escaped newlines.
    let material = material.replace("\\n", "\n");

    VerificationKey::from_parts(algorithm, &material)
        .map(Some)
        .map_err(|e| ConfigError::InvalidValue {
            name: "JWT_PUBLIC_KEY".to_string(),
            message: e.to_string(),
        })
}
