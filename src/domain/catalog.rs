//! Product catalog entities and their storefront representation.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::money::format_amount;
use crate::config::RECHARGE_TIERS_USD;

/// Currencies the storefront can display prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    /// US dollars
    Usd,
    /// Venezuelan bolívares
    Ves,
    /// Store-specific dollar unit priced separately from USD
    Usdm,
    /// Colombian pesos
    Cop,
}

impl Currency {
    /// Parse the currency code sent by the browser; unknown codes fall back to USD.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "VES" => Currency::Ves,
            "USDM" => Currency::Usdm,
            "COP" => Currency::Cop,
            _ => Currency::Usd,
        }
    }
}

/// A purchasable recharge tier belonging to a product.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub price_usd: Decimal,
    pub price_ves: Option<Decimal>,
    pub price_usdm: Option<Decimal>,
    pub price_cop: Option<Decimal>,
    pub sort_order: i32,
}

/// A game or service sold in the storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    /// Whether checkout must collect a player id for this product
    pub requires_player_id: bool,
    pub active: bool,
    pub sort_order: i32,
    pub packages: Vec<Package>,
}

impl Product {
    /// Order packages by their display order.
    pub fn sort_packages(&mut self) {
        self.packages.sort_by_key(|p| p.sort_order);
    }
}

/// Package as consumed by the storefront scripts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PackageResponse {
    #[serde(rename = "nombre_paquete")]
    #[schema(example = "100 Diamantes")]
    pub name: String,
    #[serde(rename = "precio_usd")]
    #[schema(example = "1.50")]
    pub price_usd: String,
    #[serde(rename = "precio_ves")]
    pub price_ves: Option<String>,
    #[serde(rename = "precio_usdm")]
    pub price_usdm: Option<String>,
    #[serde(rename = "precio_cop")]
    pub price_cop: Option<String>,
    #[serde(rename = "orden")]
    pub sort_order: i32,
}

impl From<Package> for PackageResponse {
    fn from(package: Package) -> Self {
        Self {
            name: package.name,
            price_usd: format_amount(package.price_usd),
            price_ves: package.price_ves.map(format_amount),
            price_usdm: package.price_usdm.map(format_amount),
            price_cop: package.price_cop.map(format_amount),
            sort_order: package.sort_order,
        }
    }
}

/// Product as consumed by the storefront scripts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    #[serde(rename = "nombre")]
    #[schema(example = "Free Fire")]
    pub name: String,
    #[schema(example = "free-fire")]
    pub slug: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    pub banner_url: Option<String>,
    #[serde(rename = "require_id")]
    pub requires_player_id: bool,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "orden")]
    pub sort_order: i32,
    #[serde(rename = "paquetes")]
    pub packages: Vec<PackageResponse>,
}

impl From<Product> for ProductResponse {
    fn from(mut product: Product) -> Self {
        product.sort_packages();
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            banner_url: product.banner_url,
            requires_player_id: product.requires_player_id,
            active: product.active,
            sort_order: product.sort_order,
            packages: product.packages.into_iter().map(PackageResponse::from).collect(),
        }
    }
}

/// Wallet recharge tier priced in USD and in bolívares at the current rate.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RechargePackage {
    #[schema(example = "Saldo $10 USD")]
    pub name: String,
    #[schema(example = "10.00")]
    pub usd: String,
    #[schema(example = "380.00")]
    pub ves: String,
}

/// Build the wallet recharge tiers for the given VES/USD exchange rate.
pub fn recharge_packages(exchange_rate: Decimal) -> Vec<RechargePackage> {
    RECHARGE_TIERS_USD
        .iter()
        .map(|&usd| {
            let usd = Decimal::from(usd);
            RechargePackage {
                name: format!("Saldo ${} USD", usd),
                usd: format_amount(usd),
                ves: format_amount(usd * exchange_rate),
            }
        })
        .collect()
}
