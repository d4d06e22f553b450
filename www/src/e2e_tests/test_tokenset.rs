//! The token bridge copies the provider's token into the `jwt` cookie.

use axum::http::{StatusCode, header};

use crate::config::ServerConfig;
use crate::e2e_tests::helpers::*;
use crate::testing::{HS256_SECRET, TestClaims, hs256_token};

#[test]
fn test_tokenset_sets_cookie_and_redirects() {
    let server = TestServer::site(zone_config(true));

    let resp = server.get("/tokenset/clip/42?jwt=abc.def.ghi", None);

    assert_eq!(resp.status, StatusCode::FOUND);
    assert_eq!(resp.header(header::LOCATION), Some("/clip/42"));

    let cookie = resp.header(header::SET_COOKIE).expect("cookie set");
    assert!(cookie.starts_with("jwt=abc.def.ghi"), "{cookie}");
    assert!(cookie.contains("Path=/"), "{cookie}");
    assert!(cookie.contains("Domain=example.com"), "{cookie}");
    assert!(!cookie.contains("HttpOnly"), "{cookie}");
    assert!(!cookie.contains("Secure"), "{cookie}");
}

#[test]
fn test_tokenset_without_token_sets_empty_cookie() {
    let server = TestServer::site(zone_config(true));

    let resp = server.get("/tokenset/clip/42", None);

    assert_eq!(resp.status, StatusCode::FOUND);
    let cookie = resp.header(header::SET_COOKIE).expect("cookie set");
    assert!(cookie.starts_with("jwt=;"), "{cookie}");
}

#[test]
fn test_tokenset_without_common_domain_is_host_only() {
    let config = ServerConfig {
        common_domain: None,
        ..zone_config(true)
    };
    let server = TestServer::site(config);

    let resp = server.get("/tokenset/home?jwt=t", None);

    let cookie = resp.header(header::SET_COOKIE).expect("cookie set");
    assert!(!cookie.contains("Domain="), "{cookie}");
}

#[test]
fn test_tokenset_root_redirects_home() {
    let server = TestServer::site(zone_config(true));

    for uri in ["/tokenset?jwt=t", "/tokenset/?jwt=t"] {
        let resp = server.get(uri, None);
        assert_eq!(resp.status, StatusCode::FOUND, "{uri}");
        assert_eq!(resp.header(header::LOCATION), Some("/"), "{uri}");
    }
}

#[test]
fn test_tokenset_never_redirects_off_site() {
    let server = TestServer::site(zone_config(true));

    for uri in [
        "/tokenset//evil.example.com?jwt=t",
        "/tokenset/%09/evil.example.com?jwt=t",
        "/tokenset/%0A/evil.example.com?jwt=t",
        "/tokenset/%0D/evil.example.com?jwt=t",
        "/tokenset/%5C%09/evil.example.com?jwt=t",
    ] {
        let resp = server.get(uri, None);
        assert_eq!(resp.status, StatusCode::FOUND, "{uri}");
        assert_eq!(
            resp.header(header::LOCATION),
            Some("/evil.example.com"),
            "{uri}"
        );
    }
}

#[test]
fn test_tokenset_control_character_inside_slug_redirects_home() {
    let server = TestServer::site(zone_config(true));

    for uri in ["/tokenset/clip/%0A1?jwt=t", "/tokenset/clip%09/1?jwt=t"] {
        let resp = server.get(uri, None);
        assert_eq!(resp.status, StatusCode::FOUND, "{uri}");
        assert_eq!(resp.header(header::LOCATION), Some("/"), "{uri}");
    }
}

#[test]
fn test_bridged_token_opens_the_zone() {
    let server = TestServer::site(zone_config(true));
    let token = hs256_token(&TestClaims::student(), HS256_SECRET);

    let bridged = server.get(&format!("/tokenset/clip/7?jwt={token}"), None);
    let cookie = bridged.header(header::SET_COOKIE).expect("cookie set");
    let value = cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("jwt="))
        .expect("jwt cookie");
    let location = bridged.header(header::LOCATION).expect("redirect");

    let resp = server.get(location, Some(value));

    assert_eq!(resp.status, StatusCode::OK);
}
