//! Wallet balance repository.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use super::entities::balance;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Balance reads and account opening. Debits go through a transaction.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Current balance, `None` when the user has no balance row
    async fn balance_of(&self, google_id: &str) -> AppResult<Option<Decimal>>;

    /// Create the zero balance row for a new user
    async fn open(&self, google_id: &str) -> AppResult<()>;
}

pub struct WalletStore {
    db: DatabaseConnection,
}

impl WalletStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WalletRepository for WalletStore {
    async fn balance_of(&self, google_id: &str) -> AppResult<Option<Decimal>> {
        let row = balance::Entity::find_by_id(google_id.to_string())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(|b| b.amount))
    }

    async fn open(&self, google_id: &str) -> AppResult<()> {
        let active = balance::ActiveModel {
            google_id: Set(google_id.to_string()),
            amount: Set(Decimal::ZERO),
            updated_at: Set(Utc::now()),
        };

        balance::Entity::insert(active)
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
