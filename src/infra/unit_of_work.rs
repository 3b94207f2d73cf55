//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-statement writes inside a
//! single database transaction.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    AccessMode, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::repositories::entities::{balance, wallet_transaction};
use super::repositories::{
    CatalogRepository, CatalogStore, PaymentRepository, PaymentStore, SiteConfigRepository,
    SiteConfigStore, UserRepository, UserStore, WalletRepository, WalletStore,
};
use crate::config::STATUS_PENDING;
use crate::domain::NewWalletTransaction;
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transactional closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method;
/// tests build a [`Persistence`] over a mock connection instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn catalog(&self) -> Arc<dyn CatalogRepository>;

    fn site_config(&self) -> Arc<dyn SiteConfigRepository>;

    fn users(&self) -> Arc<dyn UserRepository>;

    fn wallets(&self) -> Arc<dyn WalletRepository>;

    fn payments(&self) -> Arc<dyn PaymentRepository>;

    /// Execute a closure within a read-committed transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to an open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn wallets(&self) -> TxWalletRepository<'_> {
        TxWalletRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    catalog_repo: Arc<CatalogStore>,
    site_repo: Arc<SiteConfigStore>,
    user_repo: Arc<UserStore>,
    wallet_repo: Arc<WalletStore>,
    payment_repo: Arc<PaymentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            catalog_repo: Arc::new(CatalogStore::new(db.clone())),
            site_repo: Arc::new(SiteConfigStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db.clone())),
            wallet_repo: Arc::new(WalletStore::new(db.clone())),
            payment_repo: Arc::new(PaymentStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog_repo.clone()
    }

    fn site_config(&self) -> Arc<dyn SiteConfigRepository> {
        self.site_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn wallets(&self) -> Arc<dyn WalletRepository> {
        self.wallet_repo.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "Transaction rollback failed");
                }
                Err(e)
            }
        }
    }
}

/// Wallet writes that must share a transaction.
pub struct TxWalletRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxWalletRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Subtract `amount` only if the balance covers it.
    ///
    /// Returns the new balance, or `None` when funds are insufficient or the
    /// user has no balance row. The check and the write are one statement.
    pub async fn debit(&self, google_id: &str, amount: Decimal) -> AppResult<Option<Decimal>> {
        let result = balance::Entity::update_many()
            .col_expr(
                balance::Column::Amount,
                Expr::col(balance::Column::Amount).sub(amount),
            )
            .col_expr(balance::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(balance::Column::GoogleId.eq(google_id))
            .filter(balance::Column::Amount.gte(amount))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let row = balance::Entity::find_by_id(google_id.to_string())
            .one(self.txn)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::internal("Balance row vanished after debit"))?;

        Ok(Some(row.amount))
    }

    /// Append a ledger entry.
    pub async fn record(&self, entry: NewWalletTransaction) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let active = wallet_transaction::ActiveModel {
            id: Set(id),
            google_id: Set(entry.google_id),
            amount: Set(entry.amount),
            kind: Set(entry.kind),
            description: Set(entry.description),
            metadata: Set(entry.metadata),
            status: Set(STATUS_PENDING.to_string()),
            created_at: Set(Utc::now()),
        };

        wallet_transaction::Entity::insert(active)
            .exec_without_returning(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(id)
    }
}
