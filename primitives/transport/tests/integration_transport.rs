//! Integration tests for the shared transport API.
//!
//! These exercise consumer usage patterns — the way generated clients
//! drive a transport — without requiring a live HTTP server.

use std::sync::Arc;

use transport::{
    DynTransport, Method, PreparedRequest, RawResponse, Transport, TransportError,
};

struct DummyTransport;

#[async_trait::async_trait]
impl Transport for DummyTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        if request.url.ends_with("/fail") {
            Err(TransportError::Http("dummy delivery failure".to_string()))
        } else {
            Ok(RawResponse { status: 200, body: br#"{"ok": true}"#.to_vec() })
        }
    }

    fn descriptor(&self) -> &str { "dummy://" }
}

#[tokio::test]
async fn consumer_can_send_prepared_request() {
    let t = DummyTransport;
    let response = t
        .send(PreparedRequest::new(Method::Get, "dummy://host/products?"))
        .await
        .expect("ok");

    assert!(response.is_success());
    let value: serde_json::Value = serde_json::from_slice(&response.body).expect("JSON body");
    assert_eq!(value["ok"], true);
}

#[tokio::test]
async fn consumer_sees_delivery_error() {
    let t = DummyTransport;
    let err = t
        .send(PreparedRequest::new(Method::Get, "dummy://host/fail"))
        .await
        .expect_err("should err");

    match err {
        TransportError::Http(msg) => assert!(msg.contains("dummy")),
        _ => panic!("unexpected error variant"),
    }
}

#[tokio::test]
async fn transports_share_through_dyn_handle() {
    let shared: DynTransport = Arc::new(DummyTransport);
    assert_eq!(shared.descriptor(), "dummy://");

    let response = shared
        .send(PreparedRequest::new(Method::Get, "dummy://host/products?"))
        .await
        .expect("ok");
    assert_eq!(response.status, 200);
}
