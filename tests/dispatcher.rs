mod common;

use std::time::Duration;

use facturapi::{ClientError, Dispatcher};
use httpmock::prelude::*;
use reqwest::StatusCode;
use serde_json::json;

use common::{API_KEY, AUTH_HEADER};

fn dispatcher(server: &MockServer) -> Dispatcher {
    Dispatcher::new(API_KEY)
        .expect("client builds")
        .with_base_url(server.base_url())
        .expect("valid url")
}

#[test]
fn get_forwards_query_and_basic_auth() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/customers/")
            .header("authorization", AUTH_HEADER)
            .query_param("q", "XAXX010101000")
            .query_param("limit", "5");
        then.status(200).json_body(json!({ "data": [] }));
    });

    let dispatcher = dispatcher(&server);
    let url = dispatcher.build_url("customers", &[]).expect("valid url");
    let response = dispatcher
        .get(
            url,
            &[("q", "XAXX010101000".to_owned()), ("limit", "5".to_owned())],
        )
        .expect("request succeeds");

    mock.assert();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(dispatcher.last_status(), Some(StatusCode::OK));
}

#[test]
fn post_and_put_send_json_body() {
    let server = MockServer::start();
    let body = json!({ "legal_name": "ACME" });
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/customers/")
            .header("content-type", "application/json")
            .json_body(body.clone());
        then.status(201).json_body(json!({ "id": "cus_1" }));
    });
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/v2/customers/cus_1")
            .json_body(body.clone());
        then.status(200).json_body(json!({ "id": "cus_1" }));
    });

    let dispatcher = dispatcher(&server);
    let created = dispatcher
        .post(dispatcher.build_url("customers", &[]).expect("url"), Some(&body))
        .expect("post succeeds");
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(dispatcher.last_status(), Some(StatusCode::CREATED));

    dispatcher
        .put(
            dispatcher.build_url("customers", &["cus_1"]).expect("url"),
            Some(&body),
        )
        .expect("put succeeds");

    post.assert();
    put.assert();
    assert_eq!(dispatcher.last_status(), Some(StatusCode::OK));
}

#[test]
fn error_status_is_returned_not_raised() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/v2/products/prod_1");
        then.status(409)
            .json_body(json!({ "message": "Product already deleted" }));
    });

    let dispatcher = dispatcher(&server);
    let url = dispatcher.build_url("products", &["prod_1"]).expect("url");
    let response = dispatcher.delete(url, &[]).expect("HTTP errors are data");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        response.error_message().as_deref(),
        Some("Product already deleted")
    );
    assert_eq!(dispatcher.last_status(), Some(StatusCode::CONFLICT));
}

#[test]
fn unsupported_method_never_reaches_the_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.path_contains("/v2/");
        then.status(200);
    });

    let dispatcher = dispatcher(&server);
    let url = dispatcher.build_url("customers", &[]).expect("url");
    let error = dispatcher
        .execute(reqwest::Method::PATCH, url, &[], None)
        .expect_err("PATCH is rejected");

    assert!(matches!(error, ClientError::UnsupportedMethod(_)));
    mock.assert_hits(0);
    assert_eq!(dispatcher.last_status(), None);
}

#[test]
fn transport_failure_is_wrapped() {
    let dispatcher = Dispatcher::new(API_KEY)
        .expect("client builds")
        .with_base_url("http://127.0.0.1:1/")
        .expect("valid url");
    let url = dispatcher.build_url("check", &[]).expect("url");

    let error = dispatcher.get(url, &[]).expect_err("nothing listens on port 1");

    assert!(matches!(error, ClientError::Request(_)));
    assert!(std::error::Error::source(&error).is_some());
    assert_eq!(dispatcher.last_status(), None);
}

#[test]
fn slow_response_hits_the_configured_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/check/");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .json_body(json!({ "ok": true }));
    });

    let dispatcher = dispatcher(&server).with_timeout(Duration::from_millis(100));
    assert_eq!(dispatcher.timeout(), Some(Duration::from_millis(100)));
    let url = dispatcher.build_url("check", &[]).expect("url");

    let error = dispatcher.get(url, &[]).expect_err("response arrives too late");

    match error {
        ClientError::Request(source) => assert!(source.is_timeout()),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(dispatcher.last_status(), None);
}
