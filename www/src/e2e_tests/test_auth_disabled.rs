//! The kill switch: with authentication disabled the zone answers with an
//! empty 200 and never consults the token.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::*;

#[test]
fn test_disabled_zone_answers_empty_ok() {
    let server = TestServer::counting_app(&zone_config(false));

    for jwt in [None, Some("garbled"), Some("")] {
        let resp = server.get("/clip/1", jwt);
        assert_eq!(resp.status, StatusCode::OK, "{jwt:?}");
        assert!(resp.body.is_empty(), "{jwt:?}");
    }
    assert_eq!(server.app_calls(), 0);
}

#[test]
fn test_disabled_zone_leaves_other_paths_alone() {
    let server = TestServer::counting_app(&zone_config(false));

    let resp = server.get("/about", None);

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, APP_BODY);
    assert_eq!(server.app_calls(), 1);
}
