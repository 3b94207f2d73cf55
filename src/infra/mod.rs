//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Unit of Work for transaction management
//! - Google identity, Telegram and SMTP clients

pub mod db;
pub mod google;
pub mod mailer;
pub mod repositories;
pub mod telegram;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use google::{GoogleVerifier, IdentityVerifier};
pub use mailer::{LogMailer, Mailer, SmtpMailer};
pub use repositories::{
    CatalogRepository, PaymentRepository, SiteConfigRepository, UserRepository, WalletRepository,
};
pub use telegram::{ChatNotifier, InlineButton, InlineKeyboard, LogNotifier, TelegramClient};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, TxWalletRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use google::MockIdentityVerifier;
#[cfg(any(test, feature = "test-utils"))]
pub use mailer::MockMailer;
#[cfg(any(test, feature = "test-utils"))]
pub use telegram::MockChatNotifier;
