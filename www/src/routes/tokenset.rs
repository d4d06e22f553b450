//! Token bridge.
//!
//! The external authentication provider sends students back to
//! `/tokenset/<target>?jwt=<token>`. The token is copied into the `jwt`
//! cookie read by the authentication check, then the student is redirected
//! to `/<target>`.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde::Deserialize;

use super::AppState;
use crate::auth::JWT_COOKIE_NAME;

/// Query string of the bridge route.
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    /// The provider's token. Missing means an empty cookie.
    #[serde(default)]
    pub jwt: String,
}

/// `GET /tokenset/{*slug}`
pub async fn bridge(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<TokenQuery>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    set_token(&state, &slug, query, jar)
}

/// `GET /tokenset`, redirecting to the site root.
pub async fn bridge_root(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    set_token(&state, "", query, jar)
}

fn set_token(
    state: &AppState,
    slug: &str,
    query: TokenQuery,
    jar: CookieJar,
) -> (CookieJar, Response) {
    let mut cookie = Cookie::build((JWT_COOKIE_NAME, query.jwt))
        .path("/")
        .secure(false)
        .http_only(false);
    if let Some(domain) = &state.config.common_domain {
        cookie = cookie.domain(domain.clone());
    }

    let location = redirect_target(slug);
    tracing::debug!(%location, "bridged provider token into cookie");

    let redirect = (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();
    (jar.add(cookie.build()), redirect)
}

/// Site-relative redirect target for a bridge slug.
///
/// Leading slashes and control characters are dropped so the target can
/// never become a protocol-relative URL such as `//other.host`; browsers
/// strip tab, CR and LF before resolving. A slug still holding a control
/// character anywhere redirects to the site root.
#[must_use]
pub fn redirect_target(slug: &str) -> String {
    let slug = slug.trim_start_matches(|c: char| c == '/' || c == '\\' || c.is_ascii_control());
    if slug.chars().any(|c| c.is_ascii_control()) {
        return "/".to_string();
    }
    format!("/{slug}")
}
