//! Checkout form extractor.
//!
//! The storefront posts `multipart/form-data` when a receipt is attached and
//! JSON or urlencoded bodies otherwise. All three collapse into a flat
//! field map plus the optional receipt file.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};

use crate::domain::ReceiptFile;
use crate::errors::AppError;

/// Name of the multipart field carrying the payment receipt.
pub const RECEIPT_FIELD: &str = "paymentReceipt";

#[derive(Debug, Default)]
pub struct PaymentForm {
    pub fields: HashMap<String, String>,
    pub receipt: Option<ReceiptFile>,
}

fn parse_error(detail: impl std::fmt::Display) -> AppError {
    AppError::bad_request(format!(
        "Error al procesar los datos de la solicitud: {detail}. Por favor, verifica tus datos e inténtalo de nuevo."
    ))
}

/// Flatten a JSON object into form fields; nested values keep their JSON text.
fn fields_from_json(object: Map<String, Value>) -> HashMap<String, String> {
    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect()
}

impl PaymentForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = PaymentForm::default();

        while let Some(field) = multipart.next_field().await.map_err(parse_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == RECEIPT_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(parse_error)?;

                match file_name {
                    Some(file_name) if !bytes.is_empty() => {
                        tracing::debug!(file_name = %file_name, size = bytes.len(), "Receipt received");
                        form.receipt = Some(ReceiptFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                    _ => tracing::debug!("Empty receipt field ignored"),
                }
                continue;
            }

            let value = field.text().await.map_err(parse_error)?;
            form.fields.insert(name, value);
        }

        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for PaymentForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| parse_error(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let Json(object) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| parse_error(e.body_text()))?;
            return Ok(PaymentForm {
                fields: fields_from_json(object),
                receipt: None,
            });
        }

        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| parse_error(e.body_text()))?;

        Ok(PaymentForm {
            fields,
            receipt: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use serde_json::json;

    async fn extract(content_type: &str, body: impl Into<Body>) -> Result<PaymentForm, AppError> {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/payments")
            .header(CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap();
        PaymentForm::from_request(request, &()).await
    }

    #[test]
    fn json_values_are_flattened() {
        let object = json!({
            "finalPrice": 5.5,
            "email": "a@b.com",
            "cartDetails": [{"game": "Free Fire"}],
            "txid": null
        });
        let Value::Object(map) = object else { unreachable!() };
        let fields = fields_from_json(map);

        assert_eq!(fields["finalPrice"], "5.5");
        assert_eq!(fields["email"], "a@b.com");
        assert_eq!(fields["cartDetails"], r#"[{"game":"Free Fire"}]"#);
        assert!(!fields.contains_key("txid"));
    }

    #[tokio::test]
    async fn parses_urlencoded_bodies() {
        let form = extract(
            "application/x-www-form-urlencoded",
            "finalPrice=5&currency=USD&email=a%40b.com",
        )
        .await
        .unwrap();

        assert_eq!(form.fields["email"], "a@b.com");
        assert!(form.receipt.is_none());
    }

    #[tokio::test]
    async fn parses_multipart_with_receipt() {
        let body = concat!(
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"email\"\r\n\r\n",
            "a@b.com\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"paymentReceipt\"; filename=\"pago.png\"\r\n",
            "Content-Type: image/png\r\n\r\n",
            "PNGDATA\r\n",
            "--XBOUNDARY--\r\n"
        );

        let form = extract("multipart/form-data; boundary=XBOUNDARY", body)
            .await
            .unwrap();

        assert_eq!(form.fields["email"], "a@b.com");
        let receipt = form.receipt.unwrap();
        assert_eq!(receipt.file_name, "pago.png");
        assert_eq!(receipt.content_type.as_deref(), Some("image/png"));
        assert_eq!(receipt.bytes, b"PNGDATA");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let err = extract("application/json", "{not json").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(err.to_string().starts_with("Error al procesar los datos de la solicitud"));
    }
}
