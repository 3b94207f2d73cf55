//! Domain layer - Core business entities and logic
//!
//! Catalog, customers, wallet movements and payment submissions,
//! independent of how they are stored or delivered.

pub mod catalog;
pub mod money;
pub mod payment;
pub mod phone;
pub mod site;
pub mod user;
pub mod wallet;

pub use catalog::{Currency, Package, PackageResponse, Product, ProductResponse, RechargePackage};
pub use payment::{
    CartItem, MethodDetails, NewPaymentTransaction, PaymentMethod, PaymentResponse,
    PaymentSubmission, ReceiptFile,
};
pub use site::SiteConfig;
pub use user::{GoogleProfile, LoginResponse, User, UserProfile};
pub use wallet::{BalanceResponse, DebitOutcome, DeductionRequest, DeductionResponse, NewWalletTransaction};
