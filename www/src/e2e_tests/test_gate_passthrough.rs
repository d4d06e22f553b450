//! Requests outside the student zone never meet the authentication check.

use axum::http::StatusCode;

use crate::config::ServerConfig;
use crate::e2e_tests::helpers::*;

#[test]
fn test_paths_outside_zone_reach_application() {
    let server = TestServer::counting_app(&zone_config(true));

    for path in ["/", "/about", "/tokenset/clip/1", "/api/clip"] {
        let resp = server.get(path, None);
        assert_eq!(resp.status, StatusCode::OK, "{path}");
        assert_eq!(resp.body, APP_BODY, "{path}");
    }
    assert_eq!(server.app_calls(), 4);
}

#[test]
fn test_garbled_token_outside_zone_is_ignored() {
    let server = TestServer::counting_app(&zone_config(true));

    let resp = server.get("/about", Some("not.a.token"));

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, APP_BODY);
    assert_eq!(server.app_calls(), 1);
}

#[test]
fn test_empty_prefix_gates_nothing() {
    let config = ServerConfig {
        auth_path_prefix: Some(String::new()),
        ..zone_config(true)
    };
    let server = TestServer::counting_app(&config);

    for path in ["/", "/anything", "/clip/1"] {
        let resp = server.get(path, None);
        assert_eq!(resp.status, StatusCode::OK, "{path}");
        assert_eq!(resp.body, APP_BODY, "{path}");
    }
    assert_eq!(server.app_calls(), 3);
}

#[test]
fn test_unset_prefix_gates_nothing() {
    let config = ServerConfig {
        auth_path_prefix: None,
        ..zone_config(true)
    };
    let server = TestServer::counting_app(&config);

    let resp = server.get("/clip/1", None);

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(server.app_calls(), 1);
}
