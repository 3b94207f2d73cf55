//! Wallet service - balance lookup and purchases paid with balance.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::money::format_amount;
use crate::domain::{
    BalanceResponse, DebitOutcome, DeductionRequest, DeductionResponse, NewWalletTransaction, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WalletService: Send + Sync {
    /// Current balance; zero when the user has no wallet yet
    async fn balance(&self, user: &User) -> AppResult<BalanceResponse>;

    /// Debit the wallet and log the movement, atomically
    async fn deduct(&self, user: &User, request: DeductionRequest) -> AppResult<DeductionResponse>;
}

pub struct WalletManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> WalletManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> WalletService for WalletManager<U> {
    async fn balance(&self, user: &User) -> AppResult<BalanceResponse> {
        let amount = self.uow.wallets().balance_of(&user.google_id).await?;
        Ok(BalanceResponse {
            saldo: format_amount(amount.unwrap_or_default()),
        })
    }

    async fn deduct(&self, user: &User, request: DeductionRequest) -> AppResult<DeductionResponse> {
        let amount = request
            .amount()
            .ok_or_else(|| AppError::bad_request("Monto de deducción inválido."))?;

        let google_id = user.google_id.clone();
        let entry = NewWalletTransaction::service_payment(&google_id, amount, &request);

        let outcome = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let wallets = ctx.wallets();
                    match wallets.debit(&google_id, amount).await? {
                        Some(new_balance) => {
                            wallets.record(entry).await?;
                            Ok(DebitOutcome::Debited { new_balance })
                        }
                        None => Ok(DebitOutcome::Insufficient),
                    }
                })
            })
            .await?;

        match outcome {
            DebitOutcome::Debited { new_balance } => {
                tracing::info!(
                    google_id = %user.google_id,
                    amount = %amount,
                    new_balance = %new_balance,
                    "Wallet debited"
                );
                Ok(DeductionResponse {
                    message: "Deducción exitosa.".to_string(),
                    nuevo_saldo: format_amount(new_balance),
                    usuario: user.name.clone(),
                })
            }
            DebitOutcome::Insufficient => {
                tracing::info!(google_id = %user.google_id, amount = %amount, "Insufficient wallet balance");
                Err(AppError::forbidden(
                    "Saldo insuficiente en la billetera. Recarga para continuar.",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::entities::balance;
    use crate::infra::repositories::MockWalletRepository;
    use crate::infra::Persistence;
    use crate::services::testing::{sample_user, TestUnitOfWork};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    fn request(amount: serde_json::Value) -> DeductionRequest {
        DeductionRequest {
            amount_usd: amount,
            email: Some("ana@example.com".into()),
            whatsapp: None,
            cart_details: json!("[]"),
        }
    }

    fn exec(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    #[tokio::test]
    async fn balance_defaults_to_zero() {
        let mut wallets = MockWalletRepository::new();
        wallets.expect_balance_of().returning(|_| Ok(None));

        let service = WalletManager::new(Arc::new(TestUnitOfWork::default().with_wallets(wallets)));
        let response = service.balance(&sample_user("g-1")).await.unwrap();
        assert_eq!(response.saldo, "0.00");
    }

    #[tokio::test]
    async fn invalid_amount_is_rejected_before_any_write() {
        let service = WalletManager::new(Arc::new(TestUnitOfWork::default()));
        let err = service
            .deduct(&sample_user("g-1"), request(json!("-2")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Monto de deducción inválido.");
    }

    #[tokio::test]
    async fn successful_debit_updates_and_logs_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1), exec(1)])
            .append_query_results([vec![balance::Model {
                google_id: "g-1".into(),
                amount: Decimal::new(750, 2),
                updated_at: Utc::now(),
            }]])
            .into_connection();

        let uow = Arc::new(Persistence::new(db.clone()));
        let service = WalletManager::new(uow);

        let response = service
            .deduct(&sample_user("g-1"), request(json!("2.50")))
            .await
            .unwrap();

        assert_eq!(response.message, "Deducción exitosa.");
        assert_eq!(response.nuevo_saldo, "7.50");
        assert_eq!(response.usuario, "Test User");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"\"amount\" >= $"#));
        assert!(log.contains(r#"INSERT INTO \"wallet_transactions\""#));
    }

    #[tokio::test]
    async fn insufficient_funds_is_forbidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();

        let service = WalletManager::new(Arc::new(Persistence::new(db.clone())));
        let err = service
            .deduct(&sample_user("g-1"), request(json!(100)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(
            err.to_string(),
            "Saldo insuficiente en la billetera. Recarga para continuar."
        );

        // The balance guard lives in the UPDATE itself; no ledger entry follows
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"UPDATE \"balances\""#));
        assert!(log.contains(r#"\"amount\" >= $"#));
        assert!(!log.contains(r#"INSERT INTO \"wallet_transactions\""#));
    }

    #[tokio::test]
    async fn sub_cent_amount_is_rejected_before_any_write() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = WalletManager::new(Arc::new(Persistence::new(db.clone())));
        let err = service
            .deduct(&sample_user("g-1"), request(json!("0.004")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Monto de deducción inválido.");
        assert!(db.into_transaction_log().is_empty());
    }
}
