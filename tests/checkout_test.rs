//! Checkout submission parsing and the notifications built from it.

use std::collections::HashMap;

use recargas_api::domain::payment::payment_reference;
use recargas_api::domain::phone::normalize_whatsapp_number;
use recargas_api::domain::{PaymentMethod, PaymentSubmission};
use recargas_api::utils::templates;

fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn wallet_recharge_form() -> HashMap<String, String> {
    form(&[
        ("finalPrice", "380.00"),
        ("currency", "VES"),
        ("paymentMethod", "pago-movil"),
        ("email", "cliente@example.com"),
        ("whatsappNumber", "0414-123.45.67"),
        ("phone", "04121112233"),
        ("reference", "998877"),
        (
            "cartDetails",
            r#"[{"game":"Recarga de Saldo","packageName":"Saldo $10 USD","google_id":"g-42","priceUSD":"10","priceVES":"380"}]"#,
        ),
    ])
}

#[test]
fn wallet_recharge_order_is_announced_with_google_id() {
    let order = PaymentSubmission::from_fields(&wallet_recharge_form()).unwrap();
    assert_eq!(order.method, PaymentMethod::PagoMovil);
    assert!(order.is_wallet_recharge());
    assert_eq!(order.whatsapp_normalized.as_deref(), Some("584141234567"));

    let message = templates::order_chat_message(&order, "MALOK-1");
    assert!(message.contains("Nueva Recarga de Billetera"));
    assert!(message.contains("g-42"));
    assert!(message.contains("Referencia Pago Móvil: 998877"));
    assert!(message.contains("(Número normalizado: 584141234567)"));
}

#[test]
fn record_uses_first_item_and_keeps_full_cart() {
    let order = PaymentSubmission::from_fields(&wallet_recharge_form()).unwrap();
    let record = order.to_record(payment_reference(chrono::Utc::now()), None, None);

    assert!(record.reference.starts_with("MALOK-"));
    assert_eq!(record.game, "Recarga de Saldo");
    assert_eq!(record.google_id.as_deref(), Some("g-42"));
    assert_eq!(record.whatsapp_number.as_deref(), Some("584141234567"));
    assert_eq!(record.method_details["reference"], "998877");
    assert_eq!(record.cart_items.as_array().map(Vec::len), Some(1));
    assert!(record.receipt_filename.is_none());
}

#[test]
fn missing_fields_are_reported_in_order() {
    let mut fields = wallet_recharge_form();
    fields.remove("currency");
    fields.remove("email");

    let err = PaymentSubmission::from_fields(&fields).unwrap_err();
    assert_eq!(err.to_string(), "Falta el campo 'currency'.");
}

#[test]
fn customer_email_escapes_cart_text() {
    let mut fields = wallet_recharge_form();
    fields.insert(
        "cartDetails".into(),
        r#"[{"game":"Free Fire","packageName":"<b>100</b>","playerId":"123"}]"#.into(),
    );
    let order = PaymentSubmission::from_fields(&fields).unwrap();

    let html = templates::order_email_html(&order, "MALOK-7", "584143187185");
    assert!(html.contains("&lt;b&gt;100&lt;/b&gt;"));
    assert!(!html.contains("<b>100</b>"));
    assert!(templates::order_email_subject("MALOK-7").contains("MALOK-7"));
}

#[test]
fn whatsapp_numbers_normalize_to_venezuelan_format() {
    assert_eq!(normalize_whatsapp_number("04141234567").as_deref(), Some("584141234567"));
    assert_eq!(normalize_whatsapp_number("+58 0414 1234567").as_deref(), Some("584141234567"));
    assert_eq!(normalize_whatsapp_number("4241234567").as_deref(), Some("584241234567"));
    assert_eq!(normalize_whatsapp_number("12345"), None);
    assert_eq!(normalize_whatsapp_number(""), None);
}
