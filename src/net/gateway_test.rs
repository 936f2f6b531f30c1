use std::time::Duration;

use serde_json::Value;

use super::*;
use crate::notify::Notice;
use crate::routing::RouteName;
use crate::test_support::{DEAD_BASE_URL, Harness, spawn_stub};

fn status_request(code: u16, message: Option<&str>) -> OutboundRequest {
    let req = OutboundRequest::get("/api/status").query("code", &code.to_string());
    match message {
        Some(message) => req.query("message", message),
        None => req,
    }
}

#[tokio::test]
async fn unauthorized_signs_out_and_redirects_with_return_path() {
    let (base, _) = spawn_stub().await;
    let h = Harness::new(&base);
    h.session.set("abc123");
    h.router.navigate("/").unwrap();
    assert_eq!(h.router.current_full_path(), "/");

    let err = h.api.gateway().send(status_request(401, None)).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!h.session.is_present());
    assert_eq!(h.router.current_full_path(), "/login?redirect=/");
    assert_eq!(h.router.navigate("/").unwrap().route, RouteName::Login);
}

#[tokio::test]
async fn forbidden_not_found_and_server_error_notify() {
    let (base, _) = spawn_stub().await;
    let h = Harness::new(&base);
    for code in [403, 404, 500] {
        let err = h.api.gateway().send(status_request(code, None)).await.unwrap_err();
        assert_eq!(err.status(), Some(code));
    }
    assert_eq!(h.notices.notices(), vec![Notice::PermissionDenied, Notice::NotFound, Notice::ServerError]);
}

#[tokio::test]
async fn other_status_surfaces_server_message() {
    let (base, _) = spawn_stub().await;
    let h = Harness::new(&base);

    let err = h.api.gateway().send(status_request(409, Some("conflict here"))).await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 409, message: Some("conflict here".to_owned()) });
    assert_eq!(h.notices.last(), Some(Notice::Failure("conflict here".to_owned())));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (base, _) = spawn_stub().await;
    let h = Harness::new(&base);

    let err = h.api.gateway().send(OutboundRequest::get("/api/missing")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(h.notices.last(), Some(Notice::NotFound));
}

#[tokio::test]
async fn refused_connection_is_transport_failure() {
    let h = Harness::new(DEAD_BASE_URL);
    h.session.set("abc123");

    let err = h.api.gateway().send(OutboundRequest::get("/api/anything")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(h.notices.notices(), vec![Notice::Connectivity]);
    assert!(h.session.is_present());
}

#[tokio::test]
async fn timeout_is_transport_failure() {
    let (base, _) = spawn_stub().await;
    let h = Harness::with_timeout(&base, Duration::from_millis(50));

    let err = h.api.gateway().send(OutboundRequest::get("/api/slow")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
    assert_eq!(h.notices.last(), Some(Notice::Connectivity));
}

#[tokio::test]
async fn call_rejects_failing_envelope_behind_200() {
    let (base, _) = spawn_stub().await;
    let h = Harness::new(&base);

    let req = OutboundRequest::get("/api/user/verification-code").query("email", "bad@example.com");
    let err = h.api.gateway().call::<Value>(req).await.unwrap_err();
    assert_eq!(err, ApiError::Domain { code: 400, message: "invalid email".to_owned() });
    assert!(h.notices.notices().is_empty());
}

#[tokio::test]
async fn base_url_trailing_slash_is_trimmed() {
    let (base, _) = spawn_stub().await;
    let h = Harness::new(&format!("{base}/"));
    assert_eq!(h.api.gateway().base_url(), base);

    let req = OutboundRequest::get("/api/user/verification-code").query("email", "a@example.com");
    assert_eq!(h.api.gateway().call::<Value>(req).await.unwrap(), None);
}

#[test]
fn parse_body_handles_empty_and_non_json() {
    assert_eq!(parse_body(""), Value::Null);
    assert_eq!(parse_body("  "), Value::Null);
    assert_eq!(parse_body("oops"), Value::String("oops".to_owned()));
    assert_eq!(parse_body("{\"a\":1}"), serde_json::json!({ "a": 1 }));
}
