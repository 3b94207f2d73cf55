//! Unit-of-work double backed by repository mocks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    MockCatalogRepository, MockPaymentRepository, MockSiteConfigRepository, MockUserRepository,
    MockWalletRepository,
};
use crate::infra::{
    CatalogRepository, PaymentRepository, SiteConfigRepository, TransactionContext, TxFuture,
    UnitOfWork, UserRepository, WalletRepository,
};

pub(crate) fn sample_user(google_id: &str) -> User {
    User {
        id: Uuid::new_v4(),
        google_id: google_id.to_string(),
        email: "test@example.com".to_string(),
        name: "Test User".to_string(),
        picture_url: None,
        session_token: Some("session".to_string()),
        created_at: Utc::now(),
        last_login_at: Utc::now(),
    }
}

/// Repositories default to mocks without expectations.
#[derive(Default)]
pub(crate) struct TestUnitOfWork {
    catalog: Arc<MockCatalogRepository>,
    site_config: Arc<MockSiteConfigRepository>,
    users: Arc<MockUserRepository>,
    wallets: Arc<MockWalletRepository>,
    payments: Arc<MockPaymentRepository>,
}

impl TestUnitOfWork {
    pub fn with_catalog(mut self, repo: MockCatalogRepository) -> Self {
        self.catalog = Arc::new(repo);
        self
    }

    pub fn with_site_config(mut self, repo: MockSiteConfigRepository) -> Self {
        self.site_config = Arc::new(repo);
        self
    }

    pub fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub fn with_wallets(mut self, repo: MockWalletRepository) -> Self {
        self.wallets = Arc::new(repo);
        self
    }

    pub fn with_payments(mut self, repo: MockPaymentRepository) -> Self {
        self.payments = Arc::new(repo);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    fn site_config(&self) -> Arc<dyn SiteConfigRepository> {
        self.site_config.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn wallets(&self) -> Arc<dyn WalletRepository> {
        self.wallets.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // Transactions need a connection; use Persistence over MockDatabase instead
        Err(AppError::internal("Transactions not supported in test double"))
    }
}
