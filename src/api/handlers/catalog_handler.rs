//! Catalog handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::api::AppState;
use crate::domain::{ProductResponse, RechargePackage};
use crate::errors::AppResult;

/// Query string of the legacy product details endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct SlugQuery {
    /// Product slug
    pub slug: Option<String>,
}

/// List active products with their packages
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "Active products in display order", body = [ProductResponse]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.catalog_service.list_products().await?;
    Ok(Json(products))
}

/// Get one product by slug
#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    tag = "Catalog",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product with its packages", body = ProductResponse),
        (status = 404, description = "Unknown slug")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.catalog_service.get_product(&slug).await?;
    Ok(Json(product))
}

/// Product details addressed by `?slug=`
pub async fn get_product_by_query(
    State(state): State<AppState>,
    Query(query): Query<SlugQuery>,
) -> AppResult<Json<ProductResponse>> {
    let slug = query.slug.unwrap_or_default();
    let product = state.catalog_service.get_product(&slug).await?;
    Ok(Json(product))
}

/// Site theme as CSS custom properties
#[utoipa::path(
    get,
    path = "/api/site-config",
    tag = "Catalog",
    responses(
        (status = 200, description = "CSS variable map, empty when unconfigured")
    )
)]
pub async fn site_config(State(state): State<AppState>) -> AppResult<Json<BTreeMap<String, Value>>> {
    let config = state.catalog_service.site_config().await?;
    Ok(Json(config))
}

/// Wallet recharge tiers
#[utoipa::path(
    get,
    path = "/api/recharge-packages",
    tag = "Catalog",
    responses(
        (status = 200, description = "Recharge tiers priced in USD and VES", body = [RechargePackage])
    )
)]
pub async fn recharge_packages(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RechargePackage>>> {
    let tiers = state.catalog_service.recharge_packages().await?;
    Ok(Json(tiers))
}
