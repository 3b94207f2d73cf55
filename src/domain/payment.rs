//! Payment submissions and the cart they pay for.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::catalog::Currency;
use super::money::{lenient_string, parse_amount};
use super::phone::normalize_whatsapp_number;
use crate::config::{PAYMENT_REFERENCE_PREFIX, WALLET_RECHARGE_GAME_PREFIX};
use crate::errors::{AppError, AppResult};

/// Default game label when the cart does not name one.
pub const MULTI_ITEM_GAME: &str = "Carrito Múltiple";
/// Default package label when the cart does not name one.
pub const MULTI_ITEM_PACKAGE: &str = "Múltiples Paquetes";

const GAME_ROBLOX: &str = "Roblox";
const GAME_CODM: &str = "Call of Duty Mobile";

/// External payment method picked at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    PagoMovil,
    Binance,
    Zinli,
    Other(String),
}

impl PaymentMethod {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pago-movil" => PaymentMethod::PagoMovil,
            "binance" => PaymentMethod::Binance,
            "zinli" => PaymentMethod::Zinli,
            other => PaymentMethod::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            PaymentMethod::PagoMovil => "pago-movil",
            PaymentMethod::Binance => "binance",
            PaymentMethod::Zinli => "zinli",
            PaymentMethod::Other(code) => code,
        }
    }

    /// Human label: first hyphen becomes a space, then upper-cased (`PAGO MOVIL`).
    pub fn label(&self) -> String {
        self.code().replacen('-', " ", 1).to_uppercase()
    }
}

/// Method-specific proof of payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MethodDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
}

impl MethodDetails {
    fn collect(method: &PaymentMethod, fields: &HashMap<String, String>) -> Self {
        let field = |name: &str| fields.get(name).filter(|v| !v.is_empty()).cloned();
        match method {
            PaymentMethod::PagoMovil => Self {
                phone: field("phone"),
                reference: field("reference"),
                ..Default::default()
            },
            PaymentMethod::Binance => Self {
                txid: field("txid"),
                ..Default::default()
            },
            PaymentMethod::Zinli => Self {
                reference: field("reference"),
                ..Default::default()
            },
            PaymentMethod::Other(_) => Self::default(),
        }
    }
}

/// One line of the storefront cart.
///
/// Field names follow the browser's local-storage cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub game: Option<String>,
    #[serde(rename = "packageName", default, deserialize_with = "lenient_string")]
    pub package_name: Option<String>,
    #[serde(rename = "playerId", default, deserialize_with = "lenient_string")]
    pub player_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub google_id: Option<String>,
    #[serde(rename = "priceUSD", default, deserialize_with = "lenient_string")]
    pub price_usd: Option<String>,
    #[serde(rename = "priceUSDM", default, deserialize_with = "lenient_string")]
    pub price_usdm: Option<String>,
    #[serde(rename = "priceVES", default, deserialize_with = "lenient_string")]
    pub price_ves: Option<String>,
    #[serde(rename = "priceCOP", default, deserialize_with = "lenient_string")]
    pub price_cop: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,
    #[serde(rename = "robloxEmail", default, deserialize_with = "lenient_string")]
    pub roblox_email: Option<String>,
    #[serde(rename = "robloxPassword", default, deserialize_with = "lenient_string")]
    pub roblox_password: Option<String>,
    #[serde(rename = "codmEmail", default, deserialize_with = "lenient_string")]
    pub codm_email: Option<String>,
    #[serde(rename = "codmPassword", default, deserialize_with = "lenient_string")]
    pub codm_password: Option<String>,
    #[serde(rename = "codmVinculation", default, deserialize_with = "lenient_string")]
    pub codm_vinculation: Option<String>,
}

impl CartItem {
    /// Unit price in the currency selected for the whole order.
    pub fn price_for(&self, currency: Currency) -> Option<Decimal> {
        let raw = match currency {
            Currency::Usdm => self.price_usdm.as_deref(),
            Currency::Ves => self.price_ves.as_deref(),
            Currency::Cop => self.price_cop.as_deref().or(self.price_usd.as_deref()),
            Currency::Usd => self.price_usd.as_deref(),
        };
        raw.and_then(parse_amount)
    }

    pub fn is_roblox(&self) -> bool {
        self.game.as_deref() == Some(GAME_ROBLOX)
    }

    pub fn is_codm(&self) -> bool {
        self.game.as_deref() == Some(GAME_CODM)
    }

    pub fn is_wallet_recharge(&self) -> bool {
        self.game
            .as_deref()
            .is_some_and(|game| game.starts_with(WALLET_RECHARGE_GAME_PREFIX))
    }
}

/// Uploaded proof-of-payment file, kept in memory for the request.
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A validated checkout submission.
#[derive(Debug, Clone, Validate)]
pub struct PaymentSubmission {
    pub final_price: Decimal,
    /// Price exactly as typed, echoed back in notifications
    pub final_price_text: String,
    pub currency: String,
    pub method: PaymentMethod,
    #[validate(email(message = "El correo electrónico no es válido."))]
    pub email: String,
    /// Number as typed by the customer
    pub whatsapp_raw: Option<String>,
    pub whatsapp_normalized: Option<String>,
    pub method_details: MethodDetails,
    pub items: Vec<CartItem>,
}

const REQUIRED_FIELDS: [&str; 5] = ["finalPrice", "currency", "paymentMethod", "email", "cartDetails"];

impl PaymentSubmission {
    /// Validate raw form fields into a submission.
    ///
    /// Every rejection happens here, before anything is persisted.
    pub fn from_fields(fields: &HashMap<String, String>) -> AppResult<Self> {
        for name in REQUIRED_FIELDS {
            if fields.get(name).map_or(true, |v| v.trim().is_empty()) {
                return Err(AppError::bad_request(format!("Falta el campo '{name}'.")));
            }
        }
        let field = |name: &str| fields.get(name).map(|v| v.trim().to_string()).unwrap_or_default();

        let final_price_text = field("finalPrice");
        let final_price = parse_amount(&final_price_text).ok_or_else(|| {
            AppError::bad_request("El campo 'finalPrice' debe ser un número válido.")
        })?;

        let items: Vec<CartItem> = serde_json::from_str(&field("cartDetails"))
            .map_err(|_| AppError::bad_request("Formato de detalles del carrito inválido."))?;
        if items.is_empty() {
            return Err(AppError::bad_request("El carrito de compra está vacío."));
        }

        let method = PaymentMethod::parse(&field("paymentMethod"));
        let method_details = MethodDetails::collect(&method, fields);

        let whatsapp_raw = fields
            .get("whatsappNumber")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let whatsapp_normalized = whatsapp_raw.as_deref().and_then(normalize_whatsapp_number);

        let submission = Self {
            final_price,
            final_price_text,
            currency: field("currency"),
            method,
            email: field("email"),
            whatsapp_raw,
            whatsapp_normalized,
            method_details,
            items,
        };

        submission.validate().map_err(|e| {
            let message = e
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| "Datos de pago inválidos.".to_string());
            AppError::bad_request(message)
        })?;

        Ok(submission)
    }

    pub fn display_currency(&self) -> Currency {
        Currency::from_code(&self.currency)
    }

    pub fn first_item(&self) -> Option<&CartItem> {
        self.items.first()
    }

    /// A cart made of a single wallet top-up.
    pub fn is_wallet_recharge(&self) -> bool {
        self.items.len() == 1 && self.items[0].is_wallet_recharge()
    }

    /// Number to store and show: normalized when possible, as typed otherwise.
    pub fn contact_number(&self) -> Option<&str> {
        self.whatsapp_normalized
            .as_deref()
            .or(self.whatsapp_raw.as_deref())
    }

    /// Row to persist for this submission.
    pub fn to_record(&self, reference: String, chat_id: Option<String>, receipt: Option<&ReceiptFile>) -> NewPaymentTransaction {
        let first = self.first_item();
        let pick = |f: fn(&CartItem) -> Option<&String>| first.and_then(f).cloned();

        NewPaymentTransaction {
            reference,
            final_price: self.final_price,
            currency: self.currency.clone(),
            payment_method: self.method.code().to_string(),
            email: self.email.clone(),
            whatsapp_number: self.contact_number().map(str::to_string),
            method_details: serde_json::to_value(&self.method_details).unwrap_or(Value::Null),
            chat_id,
            receipt_filename: receipt.map(|r| r.file_name.clone()),
            google_id: pick(|i| i.google_id.as_ref()),
            game: pick(|i| i.game.as_ref()).unwrap_or_else(|| MULTI_ITEM_GAME.to_string()),
            package_name: pick(|i| i.package_name.as_ref())
                .unwrap_or_else(|| MULTI_ITEM_PACKAGE.to_string()),
            player_id: pick(|i| i.player_id.as_ref()),
            cart_items: serde_json::to_value(&self.items).unwrap_or(Value::Null),
        }
    }
}

/// Public order reference, `MALOK-<unix millis>`.
pub fn payment_reference(now: DateTime<Utc>) -> String {
    format!("{PAYMENT_REFERENCE_PREFIX}{}", now.timestamp_millis())
}

/// Payment row to insert, always starting as pending.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentTransaction {
    pub reference: String,
    pub final_price: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub email: String,
    pub whatsapp_number: Option<String>,
    pub method_details: Value,
    pub chat_id: Option<String>,
    pub receipt_filename: Option<String>,
    pub google_id: Option<String>,
    pub game: String,
    pub package_name: String,
    pub player_id: Option<String>,
    pub cart_items: Value,
}

/// `POST /api/payments` response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentResponse {
    #[schema(example = "Solicitud de pago recibida exitosamente. ¡Te enviaremos una confirmación pronto!")]
    pub message: String,
    #[serde(rename = "transactionId")]
    #[schema(example = "MALOK-1718000000000")]
    pub transaction_id: String,
}
