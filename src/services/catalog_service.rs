//! Catalog service - products, site theme and wallet recharge tiers.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::catalog::recharge_packages;
use crate::domain::site::default_exchange_rate;
use crate::domain::{ProductResponse, RechargePackage};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Active products with their packages, both in display order
    async fn list_products(&self) -> AppResult<Vec<ProductResponse>>;

    /// One product by slug
    async fn get_product(&self, slug: &str) -> AppResult<ProductResponse>;

    /// Site theme as CSS custom properties; empty when unconfigured
    async fn site_config(&self) -> AppResult<BTreeMap<String, Value>>;

    /// Wallet recharge tiers priced at the configured exchange rate
    async fn recharge_packages(&self) -> AppResult<Vec<RechargePackage>>;
}

pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn list_products(&self) -> AppResult<Vec<ProductResponse>> {
        let products = self.uow.catalog().list_active().await?;
        tracing::debug!(count = products.len(), "Loaded active products");
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    async fn get_product(&self, slug: &str) -> AppResult<ProductResponse> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(AppError::bad_request("Falta el 'slug' del producto."));
        }

        self.uow
            .catalog()
            .find_by_slug(slug)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| {
                AppError::not_found(format!("Producto no encontrado con el slug: {slug}"))
            })
    }

    async fn site_config(&self) -> AppResult<BTreeMap<String, Value>> {
        Ok(self
            .uow
            .site_config()
            .find()
            .await?
            .map(|config| config.css_variables())
            .unwrap_or_default())
    }

    async fn recharge_packages(&self) -> AppResult<Vec<RechargePackage>> {
        let rate = self
            .uow
            .site_config()
            .find()
            .await?
            .map(|config| config.exchange_rate_or_default())
            .unwrap_or_else(default_exchange_rate);

        Ok(recharge_packages(rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, SiteConfig};
    use crate::infra::repositories::{MockCatalogRepository, MockSiteConfigRepository};
    use crate::services::testing::TestUnitOfWork;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn product(slug: &str) -> Product {
        Product {
            id: 7,
            name: "Free Fire".into(),
            slug: slug.into(),
            description: None,
            banner_url: None,
            requires_player_id: true,
            active: true,
            sort_order: 1,
            packages: Vec::new(),
        }
    }

    #[tokio::test]
    async fn get_product_rejects_blank_slug() {
        let service = CatalogManager::new(Arc::new(TestUnitOfWork::default()));
        let err = service.get_product("  ").await.unwrap_err();
        assert_eq!(err.to_string(), "Falta el 'slug' del producto.");
    }

    #[tokio::test]
    async fn get_product_reports_unknown_slug() {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_find_by_slug()
            .with(eq("nada"))
            .returning(|_| Ok(None));

        let service = CatalogManager::new(Arc::new(TestUnitOfWork::default().with_catalog(catalog)));
        let err = service.get_product("nada").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Producto no encontrado con el slug: nada");
    }

    #[tokio::test]
    async fn get_product_maps_found_product() {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_find_by_slug()
            .returning(|slug| Ok(Some(product(slug))));

        let service = CatalogManager::new(Arc::new(TestUnitOfWork::default().with_catalog(catalog)));
        let found = service.get_product("free-fire").await.unwrap();
        assert_eq!(found.slug, "free-fire");
    }

    #[tokio::test]
    async fn missing_site_config_is_empty_map() {
        let mut site = MockSiteConfigRepository::new();
        site.expect_find().returning(|| Ok(None));

        let service = CatalogManager::new(Arc::new(TestUnitOfWork::default().with_site_config(site)));
        assert!(service.site_config().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recharge_packages_use_configured_rate() {
        let mut site = MockSiteConfigRepository::new();
        site.expect_find().returning(|| {
            Ok(Some(SiteConfig {
                exchange_rate: Some(Decimal::new(40, 0)),
                ..Default::default()
            }))
        });

        let service = CatalogManager::new(Arc::new(TestUnitOfWork::default().with_site_config(site)));
        let tiers = service.recharge_packages().await.unwrap();
        assert_eq!(tiers[1].usd, "10.00");
        assert_eq!(tiers[1].ves, "400.00");
    }
}
