//! Payment service - checkout submissions and operator notifications.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::payment::payment_reference;
use crate::domain::{PaymentResponse, PaymentSubmission, ReceiptFile};
use crate::errors::AppResult;
use crate::infra::{ChatNotifier, InlineButton, InlineKeyboard, Mailer, UnitOfWork};
use crate::utils::templates;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const SUCCESS_MESSAGE: &str =
    "Solicitud de pago recibida exitosamente. ¡Te enviaremos una confirmación pronto!";

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Validate, persist and announce a checkout submission
    async fn submit(
        &self,
        fields: HashMap<String, String>,
        receipt: Option<ReceiptFile>,
    ) -> AppResult<PaymentResponse>;
}

pub struct PaymentProcessor<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<dyn ChatNotifier>,
    mailer: Arc<dyn Mailer>,
    support_whatsapp: String,
}

impl<U: UnitOfWork> PaymentProcessor<U> {
    pub fn new(
        uow: Arc<U>,
        notifier: Arc<dyn ChatNotifier>,
        mailer: Arc<dyn Mailer>,
        support_whatsapp: impl Into<String>,
    ) -> Self {
        Self {
            uow,
            notifier,
            mailer,
            support_whatsapp: support_whatsapp.into(),
        }
    }

    fn keyboard(order: &PaymentSubmission, reference: &str) -> InlineKeyboard {
        let mut keyboard = vec![vec![InlineButton::callback(
            "✅ Marcar como Realizada",
            format!("mark_done_{reference}"),
        )]];
        if let Some(number) = &order.whatsapp_normalized {
            keyboard.push(vec![InlineButton::link(
                "💬 Contactar Cliente por WhatsApp",
                format!("https://wa.me/{number}"),
            )]);
        }
        keyboard
    }

    /// Announce the order in the operators' chat. Failures are only logged.
    async fn notify_chat(
        &self,
        payment_id: Uuid,
        order: &PaymentSubmission,
        reference: &str,
        receipt: Option<&ReceiptFile>,
    ) {
        let text = templates::order_chat_message(order, reference);
        match self
            .notifier
            .send_message(&text, Self::keyboard(order, reference))
            .await
        {
            Ok(Some(message_id)) => {
                if let Err(e) = self
                    .uow
                    .payments()
                    .set_chat_message_id(payment_id, message_id)
                    .await
                {
                    tracing::error!(reference = %reference, error = %e, "Failed to store chat message id");
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!(reference = %reference, error = %e, "Failed to send chat notification");
            }
        }

        if let Some(file) = receipt {
            let caption = templates::receipt_caption(order, reference);
            if let Err(e) = self.notifier.send_document(file, &caption).await {
                tracing::error!(reference = %reference, error = %e, "Failed to send payment receipt");
            }
        }
    }

    async fn email_customer(&self, order: &PaymentSubmission, reference: &str) {
        let subject = templates::order_email_subject(reference);
        let html = templates::order_email_html(order, reference, &self.support_whatsapp);
        if let Err(e) = self.mailer.send(&order.email, &subject, html).await {
            tracing::error!(reference = %reference, to = %order.email, error = %e, "Failed to send confirmation email");
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> PaymentService for PaymentProcessor<U> {
    async fn submit(
        &self,
        fields: HashMap<String, String>,
        receipt: Option<ReceiptFile>,
    ) -> AppResult<PaymentResponse> {
        let order = PaymentSubmission::from_fields(&fields)?;
        let reference = payment_reference(Utc::now());

        tracing::info!(
            reference = %reference,
            method = %order.method.code(),
            items = order.items.len(),
            receipt = receipt.is_some(),
            "Payment submission accepted"
        );

        let record = order.to_record(reference.clone(), self.notifier.chat_id(), receipt.as_ref());
        let payment_id = self.uow.payments().create(record).await?;

        self.notify_chat(payment_id, &order, &reference, receipt.as_ref())
            .await;
        self.email_customer(&order, &reference).await;

        Ok(PaymentResponse {
            message: SUCCESS_MESSAGE.to_string(),
            transaction_id: reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::repositories::MockPaymentRepository;
    use crate::infra::{MockChatNotifier, MockMailer};
    use crate::services::testing::TestUnitOfWork;

    fn fields(cart: &str) -> HashMap<String, String> {
        [
            ("finalPrice", "5"),
            ("currency", "USD"),
            ("paymentMethod", "binance"),
            ("email", "cliente@example.com"),
            ("whatsappNumber", "04141234567"),
            ("txid", "tx-1"),
            ("cartDetails", cart),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn receipt() -> ReceiptFile {
        ReceiptFile {
            file_name: "pago.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn persists_then_notifies_and_stores_message_id() {
        let payment_id = Uuid::new_v4();

        let mut payments = MockPaymentRepository::new();
        payments
            .expect_create()
            .withf(|p| {
                p.reference.starts_with("MALOK-")
                    && p.game == "Free Fire"
                    && p.chat_id.as_deref() == Some("-100")
                    && p.receipt_filename.as_deref() == Some("pago.jpg")
                    && p.method_details["txid"] == "tx-1"
            })
            .times(1)
            .returning(move |_| Ok(payment_id));
        payments
            .expect_set_chat_message_id()
            .withf(move |id, message_id| *id == payment_id && *message_id == 99)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut notifier = MockChatNotifier::new();
        notifier.expect_chat_id().returning(|| Some("-100".into()));
        notifier
            .expect_send_message()
            .withf(|text, keyboard| {
                text.contains("TXID Binance: tx-1")
                    && keyboard.len() == 2
                    && keyboard[1][0].url.as_deref() == Some("https://wa.me/584141234567")
            })
            .times(1)
            .returning(|_, _| Ok(Some(99)));
        notifier
            .expect_send_document()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|to, subject, _| to == "cliente@example.com" && subject.contains("MALOK-"))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = PaymentProcessor::new(
            Arc::new(TestUnitOfWork::default().with_payments(payments)),
            Arc::new(notifier),
            Arc::new(mailer),
            "584143187185",
        );

        let response = service
            .submit(fields(r#"[{"game":"Free Fire","packageName":"100"}]"#), Some(receipt()))
            .await
            .unwrap();

        assert!(response.transaction_id.starts_with("MALOK-"));
        assert_eq!(response.message, SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn notification_failures_do_not_fail_the_request() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_create()
            .returning(|_| Ok(Uuid::new_v4()));
        payments.expect_set_chat_message_id().never();

        let mut notifier = MockChatNotifier::new();
        notifier.expect_chat_id().returning(|| None);
        notifier
            .expect_send_message()
            .returning(|_, _| Err(AppError::upstream("telegram down")));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .returning(|_, _, _| Err(AppError::upstream("smtp down")));

        let service = PaymentProcessor::new(
            Arc::new(TestUnitOfWork::default().with_payments(payments)),
            Arc::new(notifier),
            Arc::new(mailer),
            "584143187185",
        );

        let response = service
            .submit(fields(r#"[{"game":"Free Fire"}]"#), None)
            .await;
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn invalid_cart_is_rejected_before_persisting() {
        let mut payments = MockPaymentRepository::new();
        payments.expect_create().never();

        let service = PaymentProcessor::new(
            Arc::new(TestUnitOfWork::default().with_payments(payments)),
            Arc::new(MockChatNotifier::new()),
            Arc::new(MockMailer::new()),
            "584143187185",
        );

        let err = service.submit(fields("[]"), None).await.unwrap_err();
        assert_eq!(err.to_string(), "El carrito de compra está vacío.");
    }
}
