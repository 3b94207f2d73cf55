//! Site configuration repository.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::entities::site_config;
use crate::config::SITE_CONFIG_ROW_ID;
use crate::domain::SiteConfig;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SiteConfigRepository: Send + Sync {
    /// The single settings row, if it has been created
    async fn find(&self) -> AppResult<Option<SiteConfig>>;
}

pub struct SiteConfigStore {
    db: DatabaseConnection,
}

impl SiteConfigStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SiteConfigRepository for SiteConfigStore {
    async fn find(&self) -> AppResult<Option<SiteConfig>> {
        let row = site_config::Entity::find_by_id(SITE_CONFIG_ROW_ID)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(SiteConfig::from))
    }
}
