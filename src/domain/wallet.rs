//! Wallet balance movements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use super::money::amount_from_value;
use crate::config::WALLET_KIND_SERVICE_PAYMENT;

/// Body of a wallet deduction request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeductionRequest {
    /// Amount in USD, as a string or a number
    #[serde(rename = "amountUSD", default)]
    #[schema(value_type = String, example = "4.50")]
    pub amount_usd: Value,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    /// Cart snapshot, either a JSON array or its string encoding
    #[serde(rename = "cartDetails", default)]
    #[schema(value_type = Object)]
    pub cart_details: Value,
}

impl DeductionRequest {
    /// The requested amount when it is a positive number of whole cents.
    ///
    /// Balances are stored with two decimals, so anything finer would be
    /// rounded away by the datastore.
    pub fn amount(&self) -> Option<Decimal> {
        amount_from_value(&self.amount_usd)
            .map(|amount| amount.normalize())
            .filter(|amount| *amount > Decimal::ZERO && amount.scale() <= 2)
    }

    /// Metadata recorded alongside the debit.
    ///
    /// A cart sent as a string is stored as parsed JSON when it parses.
    pub fn metadata(&self) -> Value {
        let cart = match &self.cart_details {
            Value::String(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone())),
            other => other.clone(),
        };
        json!({
            "email": self.email,
            "whatsapp": self.whatsapp,
            "cartDetails": cart,
        })
    }
}

/// Ledger entry to append for a wallet movement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWalletTransaction {
    pub google_id: String,
    /// Signed amount; debits are negative
    pub amount: Decimal,
    pub kind: String,
    pub description: String,
    pub metadata: Value,
}

impl NewWalletTransaction {
    /// Ledger entry for a purchase paid from the wallet.
    pub fn service_payment(google_id: &str, amount: Decimal, request: &DeductionRequest) -> Self {
        let email = request.email.as_deref().unwrap_or("sin correo");
        Self {
            google_id: google_id.to_string(),
            amount: -amount,
            kind: WALLET_KIND_SERVICE_PAYMENT.to_string(),
            description: format!("Pago de servicio con Wallet ({email})"),
            metadata: request.metadata(),
        }
    }
}

/// Result of an atomic debit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    Debited { new_balance: Decimal },
    Insufficient,
}

/// `GET /api/wallet/balance` response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BalanceResponse {
    #[schema(example = "12.50")]
    pub saldo: String,
}

/// `POST /api/wallet/deduct` response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeductionResponse {
    #[schema(example = "Deducción exitosa.")]
    pub message: String,
    #[schema(example = "7.50")]
    pub nuevo_saldo: String,
    /// Display name of the debited user
    #[schema(example = "María Pérez")]
    pub usuario: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: Value, cart: Value) -> DeductionRequest {
        DeductionRequest {
            amount_usd: amount,
            email: Some("a@b.com".into()),
            whatsapp: Some("04141234567".into()),
            cart_details: cart,
        }
    }

    #[test]
    fn amount_must_be_positive_number() {
        assert_eq!(request(json!("4.50"), Value::Null).amount(), Some(Decimal::new(450, 2)));
        assert_eq!(request(json!(2), Value::Null).amount(), Some(Decimal::new(2, 0)));
        assert_eq!(request(json!("0"), Value::Null).amount(), None);
        assert_eq!(request(json!(-1), Value::Null).amount(), None);
        assert_eq!(request(json!("abc"), Value::Null).amount(), None);
        assert_eq!(request(Value::Null, Value::Null).amount(), None);
    }

    #[test]
    fn amount_must_be_whole_cents() {
        assert_eq!(request(json!("0.004"), Value::Null).amount(), None);
        assert_eq!(request(json!("0.005"), Value::Null).amount(), None);
        assert_eq!(request(json!(1.999), Value::Null).amount(), None);
        assert_eq!(request(json!("0.01"), Value::Null).amount(), Some(Decimal::new(1, 2)));
        assert_eq!(request(json!("2.500"), Value::Null).amount(), Some(Decimal::new(25, 1)));
    }

    #[test]
    fn string_cart_is_parsed_into_metadata() {
        let req = request(json!(1), json!("[{\"game\":\"Free Fire\"}]"));
        let metadata = req.metadata();
        assert_eq!(metadata["cartDetails"][0]["game"], "Free Fire");
        assert_eq!(metadata["email"], "a@b.com");
    }

    #[test]
    fn service_payment_is_negative() {
        let req = request(json!(3), json!([]));
        let entry = NewWalletTransaction::service_payment("g-1", Decimal::new(3, 0), &req);
        assert_eq!(entry.amount, Decimal::new(-3, 0));
        assert_eq!(entry.kind, "pago_servicio");
        assert_eq!(entry.description, "Pago de servicio con Wallet (a@b.com)");
    }
}
