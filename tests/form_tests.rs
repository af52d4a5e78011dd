mod common;

use common::{BUSINESS, Harness};
use paypal_web_checkout::application::ipn_verifier::VERIFIED;
use paypal_web_checkout::domain::checkout::PAYPAL_SANDBOX_URL;
use paypal_web_checkout::domain::money::MinorUnits;
use paypal_web_checkout::domain::order::OrderId;
use paypal_web_checkout::error::PaymentError;
use paypal_web_checkout::infrastructure::test_doubles::PaymentEvent;

#[tokio::test]
async fn test_cart_form_field_order() {
    let harness = Harness::new(VERIFIED).await;

    let form = harness
        .form_builder
        .build_form(&OrderId::from("77"))
        .await
        .unwrap();

    assert_eq!(form.action, PAYPAL_SANDBOX_URL);
    assert_eq!(form.method, "POST");
    assert_eq!(
        form.field_names(),
        vec![
            "business",
            "item_number",
            "currency_code",
            "return",
            "cancel_return",
            "notify_url",
            "cmd",
            "upload",
            "lc",
            "item_name_1",
            "amount_1",
            "quantity_1",
            "item_name_2",
            "amount_2",
            "quantity_2",
            "discount_amount_cart",
        ]
    );
}

#[tokio::test]
async fn test_cart_form_values() {
    let harness = Harness::new(VERIFIED).await;

    let form = harness
        .form_builder
        .build_form(&OrderId::from("77"))
        .await
        .unwrap();

    assert_eq!(form.get("business"), Some(BUSINESS));
    assert_eq!(form.get("item_number"), Some("77"));
    assert_eq!(form.get("currency_code"), Some("EUR"));
    assert_eq!(
        form.get("return"),
        Some("https://shop.example.com/payment/paypal_web_checkout/ok?order_id=77")
    );
    assert_eq!(
        form.get("cancel_return"),
        Some("https://shop.example.com/payment/paypal_web_checkout/ko?order_id=77")
    );
    assert_eq!(
        form.get("notify_url"),
        Some("https://shop.example.com/payment/paypal_web_checkout/process?order_id=77")
    );
    assert_eq!(form.get("cmd"), Some("_cart"));
    assert_eq!(form.get("upload"), Some("1"));
    assert_eq!(form.get("lc"), Some("en_US"));
    assert_eq!(form.get("item_name_1"), Some("Mug"));
    assert_eq!(form.get("amount_1"), Some("12.00"));
    assert_eq!(form.get("quantity_1"), Some("1"));
    assert_eq!(form.get("item_name_2"), Some("Tea"));
    assert_eq!(form.get("amount_2"), Some("8.50"));
    assert_eq!(form.get("quantity_2"), Some("2"));
    assert_eq!(form.get("discount_amount_cart"), Some("4.00"));
}

#[tokio::test]
async fn test_form_is_idempotent() {
    let harness = Harness::new(VERIFIED).await;
    let order_id = OrderId::from("77");

    let first = harness.form_builder.build_form(&order_id).await.unwrap();
    let second = harness.form_builder.build_form(&order_id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_urlencoded(), second.to_urlencoded());
}

#[tokio::test]
async fn test_unsupported_currency_fails_after_events() {
    let harness = Harness::new(VERIFIED).await;

    let result = harness
        .form_builder
        .build_form(&OrderId::from("bitcoin"))
        .await;

    assert!(matches!(result, Err(PaymentError::CurrencyNotSupported(code)) if code == "XBT"));
    assert_eq!(
        harness.notifier.events().await,
        vec![
            PaymentEvent::OrderLoad(OrderId::from("bitcoin")),
            PaymentEvent::OrderCreated(OrderId::from("bitcoin")),
        ]
    );
}

#[tokio::test]
async fn test_cart_must_add_up_to_order_amount() {
    let harness = Harness::new(VERIFIED).await;

    let result = harness
        .form_builder
        .build_form(&OrderId::from("short"))
        .await;

    match result {
        Err(PaymentError::CartMismatch {
            expected, charged, ..
        }) => {
            assert_eq!(expected, MinorUnits::new(1000));
            assert_eq!(charged, Some(MinorUnits::new(500)));
        }
        other => panic!("expected CartMismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_order_fails() {
    let harness = Harness::new(VERIFIED).await;

    let result = harness
        .form_builder
        .build_form(&OrderId::from("nope"))
        .await;

    assert!(matches!(result, Err(PaymentError::OrderNotFound(_))));
}

#[tokio::test]
async fn test_form_amount_matches_ipn_check() {
    use common::ipn;
    use paypal_web_checkout::application::ipn_verifier::IpnOutcome;

    let harness = Harness::new(VERIFIED).await;
    let order_id = OrderId::from("42");
    let form = harness.form_builder.build_form(&order_id).await.unwrap();

    // Echo back what the form sent, as PayPal would
    let gross = form.get("amount_1").unwrap().to_string();
    let currency = form.get("currency_code").unwrap().to_string();
    let outcome = harness
        .ipn_verifier
        .process(&order_id, &ipn(&gross, &currency, "Completed", "TXN-9"))
        .await
        .unwrap();

    assert_eq!(outcome, IpnOutcome::Completed);
}
