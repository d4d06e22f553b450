//! Request gate.
//!
//! Every inbound request passes through the gate. Paths inside the
//! authenticated zone are answered by the authentication check; all other
//! paths continue to the application untouched.
//!
//! # Invariants
//!
//! - An unset or empty zone prefix matches no path, not every path.
//! - The check runs only for paths inside the zone.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::auth::{AuthCheck, AuthDecision};
use crate::config::ServerConfig;

/// Body of the response for denied requests.
pub const UNAUTHORIZED_BODY: &str = "Unauthorized";

/// What the gate decided for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The path is outside the zone; the application handles it.
    PassThrough,
    /// The path is inside the zone and the check allowed it.
    Allowed,
    /// The path is inside the zone but the check is switched off.
    Disabled,
    /// The path is inside the zone and the check denied it.
    Denied,
}

/// Request gate for the authenticated zone.
#[derive(Debug, Clone)]
pub struct RequestGate {
    prefix: Option<String>,
    check: AuthCheck,
}

impl RequestGate {
    #[must_use]
    pub fn new(prefix: Option<String>, check: AuthCheck) -> Self {
        Self {
            prefix: prefix.filter(|prefix| !prefix.is_empty()),
            check,
        }
    }

    /// Build the gate described by the server configuration.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.auth_path_prefix.clone(),
            AuthCheck::new(config.auth_enabled, config.verification_key.clone()),
        )
    }

    /// Whether `path` lies inside the authenticated zone.
    #[must_use]
    pub fn is_gated(&self, path: &str) -> bool {
        self.prefix
            .as_deref()
            .is_some_and(|prefix| path.starts_with(prefix))
    }

    /// Decide what happens to a request for `path` carrying `cookies`.
    #[must_use]
    pub fn route(&self, path: &str, cookies: &CookieJar) -> GateOutcome {
        if !self.is_gated(path) {
            return GateOutcome::PassThrough;
        }
        if !self.check.is_enabled() {
            return GateOutcome::Disabled;
        }
        match self.check.check(cookies) {
            AuthDecision::Allow => GateOutcome::Allowed,
            AuthDecision::Deny => GateOutcome::Denied,
        }
    }
}

/// Axum middleware applying a [`RequestGate`] to every request.
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn gate_middleware(
    State(gate): State<Arc<RequestGate>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    match gate.route(&path, &jar) {
        GateOutcome::PassThrough | GateOutcome::Allowed => next.run(request).await,
        GateOutcome::Disabled => StatusCode::OK.into_response(),
        GateOutcome::Denied => {
            tracing::info!(%path, "unauthorized request to student zone");
            (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response()
        }
    }
}
