mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use common::Harness;
use paypal_web_checkout::application::ipn_verifier::VERIFIED;
use paypal_web_checkout::infrastructure::test_doubles::PaymentEvent;
use paypal_web_checkout::interfaces::http::router;
use tower::ServiceExt;

const PROCESS: &str = "/payment/paypal_web_checkout/process";
const EXECUTE: &str = "/payment/paypal_web_checkout/execute";

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn ipn_request(query: &str, body: &str) -> Request<Body> {
    Request::post(format!("{PROCESS}{query}"))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_ipn_success_answers_ok() {
    let (state, notifier) = Harness::new(VERIFIED).await.into_state();

    let (status, body) = send(
        router(state),
        ipn_request(
            "?order_id=42",
            "mc_gross=10.00&mc_currency=USD&payment_status=Completed&item_number=42&txn_id=T1",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert_eq!(notifier.count(PaymentEvent::is_success).await, 1);
}

#[tokio::test]
async fn test_ipn_always_answers_200() {
    let cases = [
        // amount mismatch
        (
            "?order_id=42",
            "mc_gross=9.99&mc_currency=USD&payment_status=Completed&item_number=42",
            "OK",
        ),
        // unknown order
        (
            "?order_id=999",
            "mc_gross=10.00&mc_currency=USD&payment_status=Completed&item_number=999",
            "OK",
        ),
        // missing payment_status
        ("?order_id=42", "mc_gross=10.00&item_number=42", "FAIL"),
        // missing order id
        ("", "mc_gross=10.00&payment_status=Completed&item_number=42", "FAIL"),
        ("?order_id=", "payment_status=Completed&item_number=42", "FAIL"),
    ];

    for (query, body, expected) in cases {
        let (state, _) = Harness::new(VERIFIED).await.into_state();
        let (status, answer) = send(router(state), ipn_request(query, body)).await;

        assert_eq!(status, StatusCode::OK, "{query} {body}");
        assert_eq!(answer, expected, "{query} {body}");
    }
}

#[tokio::test]
async fn test_ipn_unverified_fires_fail_event() {
    let (state, notifier) = Harness::new("INVALID").await.into_state();

    let (status, body) = send(
        router(state),
        ipn_request(
            "?order_id=42",
            "mc_gross=10.00&mc_currency=USD&payment_status=Completed&item_number=42",
        ),
    )
    .await;

    assert_eq!((status, body.as_str()), (StatusCode::OK, "OK"));
    assert_eq!(notifier.count(PaymentEvent::is_fail).await, 1);
    assert_eq!(notifier.count(PaymentEvent::is_success).await, 0);
}

#[tokio::test]
async fn test_ipn_non_utf8_body_still_answers_200() {
    let (state, _) = Harness::new(VERIFIED).await.into_state();
    let request = Request::post(format!("{PROCESS}?order_id=42"))
        .body(Body::from(vec![0xff, 0xfe, b'&', b'x']))
        .unwrap();

    let (status, body) = send(router(state), request).await;

    assert_eq!((status, body.as_str()), (StatusCode::OK, "FAIL"));
}

#[tokio::test]
async fn test_execute_renders_form() {
    let (state, _) = Harness::new(VERIFIED).await.into_state();
    let request = Request::get(format!("{EXECUTE}?order_id=77"))
        .body(Body::empty())
        .unwrap();

    let (status, html) = send(router(state), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"action="https://www.sandbox.paypal.com/cgi-bin/webscr""#));
    assert!(html.contains(r#"name="discount_amount_cart" value="4.00""#));
    assert_eq!(html.matches(r#"type="hidden""#).count(), 16);
}

#[tokio::test]
async fn test_execute_error_pages() {
    let cases = [
        ("?order_id=nope", StatusCode::NOT_FOUND),
        ("?order_id=bitcoin", StatusCode::UNPROCESSABLE_ENTITY),
        ("?order_id=short", StatusCode::UNPROCESSABLE_ENTITY),
        ("", StatusCode::BAD_REQUEST),
    ];

    for (query, expected) in cases {
        let (state, _) = Harness::new(VERIFIED).await.into_state();
        let request = Request::get(format!("{EXECUTE}{query}"))
            .body(Body::empty())
            .unwrap();

        let (status, html) = send(router(state), request).await;

        assert_eq!(status, expected, "{query}");
        assert!(html.contains("Payment error"));
    }
}

#[tokio::test]
async fn test_return_pages_echo_order() {
    let (state, _) = Harness::new(VERIFIED).await.into_state();
    let app = router(state);

    let (status, html) = send(
        app.clone(),
        Request::get("/payment/paypal_web_checkout/ok?order_id=42")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("order #42"));

    let (status, html) = send(
        app,
        Request::get("/payment/paypal_web_checkout/ko?order_id=%3Cb%3E")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("order #&lt;b&gt;"));
}
