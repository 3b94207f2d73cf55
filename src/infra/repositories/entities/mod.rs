//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod balance;
pub mod package;
pub mod payment_transaction;
pub mod product;
pub mod site_config;
pub mod user;
pub mod wallet_transaction;
