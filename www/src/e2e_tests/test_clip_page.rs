//! Clip page data.

use axum::http::{StatusCode, header};

use crate::config::ServerConfig;
use crate::e2e_tests::helpers::*;

#[test]
fn test_clip_page_data() {
    // A disabled zone answers for itself, so keep clips outside it.
    let config = ServerConfig {
        auth_path_prefix: Some("/student".to_string()),
        ..zone_config(false)
    };
    let server = TestServer::site(config);

    let resp = server.get("/clip/lecture-3", None);

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header(header::CONTENT_TYPE), Some("application/json"));
    let page: serde_json::Value = serde_json::from_str(&resp.body).expect("json body");
    assert_eq!(
        page,
        serde_json::json!({ "id": "lecture-3", "domain": "cdn.example.com" })
    );
}

#[test]
fn test_clip_page_without_cdn_domain() {
    let config = ServerConfig {
        auth_path_prefix: None,
        cdn_domain: None,
        ..zone_config(false)
    };
    let server = TestServer::site(config);

    let resp = server.get("/clip/9", None);

    let page: serde_json::Value = serde_json::from_str(&resp.body).expect("json body");
    assert_eq!(page, serde_json::json!({ "id": "9", "domain": "" }));
}

#[test]
fn test_unknown_path_is_not_found() {
    let config = ServerConfig {
        auth_path_prefix: None,
        ..zone_config(false)
    };
    let server = TestServer::site(config);

    let resp = server.get("/nothing/here", None);

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
