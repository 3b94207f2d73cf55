//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{
    AuthService, CatalogService, PaymentService, ServiceContainer, Services, WalletService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Products, site theme and recharge tiers
    pub catalog_service: Arc<dyn CatalogService>,
    /// Google login and session lookup
    pub auth_service: Arc<dyn AuthService>,
    /// Wallet balance and deductions
    pub wallet_service: Arc<dyn WalletService>,
    /// Checkout submissions
    pub payment_service: Arc<dyn PaymentService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from the database and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let container = Services::from_config(database.get_connection(), config, http)?;
        Ok(Self::from_container(&container, database))
    }

    /// Create application state from any service container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            catalog_service: container.catalog(),
            auth_service: container.auth(),
            wallet_service: container.wallet(),
            payment_service: container.payments(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        catalog_service: Arc<dyn CatalogService>,
        auth_service: Arc<dyn AuthService>,
        wallet_service: Arc<dyn WalletService>,
        payment_service: Arc<dyn PaymentService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            catalog_service,
            auth_service,
            wallet_service,
            payment_service,
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        MockAuthService, MockCatalogService, MockPaymentService, MockServiceContainer,
        MockWalletService,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn state_takes_every_service_from_the_container() {
        let mut container = MockServiceContainer::new();
        container.expect_catalog().times(1).returning(|| {
            let mut catalog = MockCatalogService::new();
            catalog.expect_list_products().returning(|| Ok(Vec::new()));
            Arc::new(catalog)
        });
        container
            .expect_auth()
            .times(1)
            .returning(|| Arc::new(MockAuthService::new()));
        container
            .expect_wallet()
            .times(1)
            .returning(|| Arc::new(MockWalletService::new()));
        container
            .expect_payments()
            .times(1)
            .returning(|| Arc::new(MockPaymentService::new()));

        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let state = AppState::from_container(&container, Arc::new(Database::from_connection(db)));

        assert!(state.catalog_service.list_products().await.unwrap().is_empty());
    }
}
