//! Payment transaction repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::payment_transaction::{ActiveModel, Entity as PaymentEntity};
use crate::config::STATUS_PENDING;
use crate::domain::NewPaymentTransaction;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a pending payment and return its row id
    async fn create(&self, payment: NewPaymentTransaction) -> AppResult<Uuid>;

    /// Remember the chat message that announced the payment
    async fn set_chat_message_id(&self, id: Uuid, message_id: i64) -> AppResult<()>;
}

pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn create(&self, payment: NewPaymentTransaction) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let active = ActiveModel {
            id: Set(id),
            reference: Set(payment.reference),
            final_price: Set(payment.final_price),
            currency: Set(payment.currency),
            payment_method: Set(payment.payment_method),
            email: Set(payment.email),
            whatsapp_number: Set(payment.whatsapp_number),
            method_details: Set(payment.method_details),
            status: Set(STATUS_PENDING.to_string()),
            chat_id: Set(payment.chat_id),
            chat_message_id: Set(None),
            receipt_filename: Set(payment.receipt_filename),
            google_id: Set(payment.google_id),
            game: Set(payment.game),
            package_name: Set(payment.package_name),
            player_id: Set(payment.player_id),
            cart_items: Set(payment.cart_items),
            created_at: Set(Utc::now()),
        };

        PaymentEntity::insert(active)
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(id)
    }

    async fn set_chat_message_id(&self, id: Uuid, message_id: i64) -> AppResult<()> {
        let active = ActiveModel {
            id: Set(id),
            chat_message_id: Set(Some(message_id)),
            ..Default::default()
        };

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}
