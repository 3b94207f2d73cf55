//! Service Container - Centralized service access.
//!
//! Wires every service to the shared Unit of Work and to the outbound
//! integrations selected by configuration.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CatalogManager, CatalogService, PaymentProcessor, PaymentService,
    WalletManager, WalletService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{
    ChatNotifier, GoogleVerifier, LogMailer, LogNotifier, Mailer, Persistence, SmtpMailer,
    TelegramClient,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn auth(&self) -> Arc<dyn AuthService>;

    fn wallet(&self) -> Arc<dyn WalletService>;

    fn payments(&self) -> Arc<dyn PaymentService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    catalog_service: Arc<dyn CatalogService>,
    auth_service: Arc<dyn AuthService>,
    wallet_service: Arc<dyn WalletService>,
    payment_service: Arc<dyn PaymentService>,
}

impl Services {
    pub fn new(
        catalog_service: Arc<dyn CatalogService>,
        auth_service: Arc<dyn AuthService>,
        wallet_service: Arc<dyn WalletService>,
        payment_service: Arc<dyn PaymentService>,
    ) -> Self {
        Self {
            catalog_service,
            auth_service,
            wallet_service,
            payment_service,
        }
    }

    /// Build every service from a database connection and config.
    ///
    /// Telegram and SMTP fall back to log-only implementations when their
    /// settings are absent.
    pub fn from_config(
        db: sea_orm::DatabaseConnection,
        config: &Config,
        http: reqwest::Client,
    ) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(db));

        let verifier = Arc::new(GoogleVerifier::new(
            http.clone(),
            config.google_client_id.clone(),
        ));

        let notifier: Arc<dyn ChatNotifier> = match &config.telegram {
            Some(settings) => Arc::new(TelegramClient::new(http, settings)),
            None => {
                tracing::warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID not set, order alerts will only be logged");
                Arc::new(LogNotifier)
            }
        };

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(settings) => Arc::new(SmtpMailer::new(settings)?),
            None => {
                tracing::warn!("SMTP settings incomplete, confirmation emails will only be logged");
                Arc::new(LogMailer)
            }
        };

        Ok(Self {
            catalog_service: Arc::new(CatalogManager::new(uow.clone())),
            auth_service: Arc::new(Authenticator::new(uow.clone(), verifier)),
            wallet_service: Arc::new(WalletManager::new(uow.clone())),
            payment_service: Arc::new(PaymentProcessor::new(
                uow,
                notifier,
                mailer,
                config.support_whatsapp.clone(),
            )),
        })
    }
}

impl ServiceContainer for Services {
    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn wallet(&self) -> Arc<dyn WalletService> {
        self.wallet_service.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentService> {
        self.payment_service.clone()
    }
}
