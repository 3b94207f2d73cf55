//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach repositories through the Unit of Work.

mod auth_service;
mod catalog_service;
pub mod container;
mod payment_service;
mod wallet_service;

#[cfg(test)]
pub(crate) mod testing;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use catalog_service::{CatalogManager, CatalogService};
pub use payment_service::{PaymentProcessor, PaymentService};
pub use wallet_service::{WalletManager, WalletService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use catalog_service::MockCatalogService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_service::MockPaymentService;
#[cfg(any(test, feature = "test-utils"))]
pub use wallet_service::MockWalletService;
