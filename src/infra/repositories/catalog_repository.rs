//! Product catalog repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::entities::{package, product};
use crate::domain::Product;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read access to products and their packages.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Active products in display order, packages included and ordered
    async fn list_active(&self) -> AppResult<Vec<Product>>;

    /// Product by slug regardless of its active flag
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Product>>;
}

pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn packages_for(&self, product_ids: Vec<i32>) -> AppResult<HashMap<i32, Vec<package::Model>>> {
        let rows = package::Entity::find()
            .filter(package::Column::ProductId.is_in(product_ids))
            .order_by_asc(package::Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let mut grouped: HashMap<i32, Vec<package::Model>> = HashMap::new();
        for row in rows {
            grouped.entry(row.product_id).or_default().push(row);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn list_active(&self) -> AppResult<Vec<Product>> {
        let products = product::Entity::find()
            .filter(product::Column::Active.eq(true))
            .order_by_asc(product::Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if products.is_empty() {
            return Ok(Vec::new());
        }

        let mut packages = self
            .packages_for(products.iter().map(|p| p.id).collect())
            .await?;

        Ok(products
            .into_iter()
            .map(|model| {
                let own = packages.remove(&model.id).unwrap_or_default();
                model.into_product(own)
            })
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Product>> {
        let Some(model) = product::Entity::find()
            .filter(product::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let own = self
            .packages_for(vec![model.id])
            .await?
            .remove(&model.id)
            .unwrap_or_default();

        Ok(Some(model.into_product(own)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn product_row(id: i32, slug: &str, order: i32) -> product::Model {
        product::Model {
            id,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            description: None,
            banner_url: None,
            requires_player_id: true,
            active: true,
            sort_order: order,
        }
    }

    fn package_row(id: i32, product_id: i32, order: i32) -> package::Model {
        package::Model {
            id,
            product_id,
            name: format!("Paquete {id}"),
            price_usd: Decimal::new(199, 2),
            price_ves: Some(Decimal::new(7600, 2)),
            price_usdm: None,
            price_cop: None,
            sort_order: order,
        }
    }

    #[tokio::test]
    async fn list_active_filters_orders_and_groups() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product_row(1, "free-fire", 1), product_row(2, "roblox", 2)]])
            .append_query_results([vec![
                package_row(10, 2, 1),
                package_row(11, 1, 1),
                package_row(12, 1, 2),
            ]])
            .into_connection();

        let store = CatalogStore::new(db);
        let products = store.list_active().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].slug, "free-fire");
        assert_eq!(products[0].packages.len(), 2);
        assert_eq!(products[1].packages[0].id, 10);

        let log = format!("{:?}", store.db.into_transaction_log());
        assert!(log.contains(r#"\"products\".\"active\" = $1"#));
        assert!(log.contains(r#"ORDER BY \"products\".\"sort_order\" ASC"#));
        assert!(log.contains(r#"ORDER BY \"packages\".\"sort_order\" ASC"#));
    }

    #[tokio::test]
    async fn list_active_skips_package_query_when_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();

        let store = CatalogStore::new(db);
        assert!(store.list_active().await.unwrap().is_empty());
        assert_eq!(store.db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn find_by_slug_returns_none_for_unknown() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();

        let store = CatalogStore::new(db);
        assert!(store.find_by_slug("nope").await.unwrap().is_none());
    }
}
