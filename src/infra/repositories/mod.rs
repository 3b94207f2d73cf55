//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod catalog_repository;
pub(crate) mod entities;
mod payment_repository;
mod site_repository;
mod user_repository;
mod wallet_repository;

pub use catalog_repository::{CatalogRepository, CatalogStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use site_repository::{SiteConfigRepository, SiteConfigStore};
pub use user_repository::{UserRepository, UserStore};
pub use wallet_repository::{WalletRepository, WalletStore};

#[cfg(any(test, feature = "test-utils"))]
pub use catalog_repository::MockCatalogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use site_repository::MockSiteConfigRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use wallet_repository::MockWalletRepository;
