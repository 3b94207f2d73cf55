//! User domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::money::format_amount;

/// Storefront customer, identified by their Google account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub google_id: String,
    pub email: String,
    pub name: String,
    pub picture_url: Option<String>,
    /// Opaque bearer credential, rotated at every login
    pub session_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

/// Identity asserted by a verified Google ID token
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleProfile {
    #[serde(rename = "sub")]
    pub google_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Generate a fresh, unguessable session token.
pub fn generate_session_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Public profile returned after login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    #[schema(example = "108123456789012345678")]
    pub google_id: String,
    #[schema(example = "María Pérez")]
    pub name: String,
    #[schema(example = "maria@example.com")]
    pub email: String,
    pub picture: Option<String>,
    /// Wallet balance in USD, two decimals
    #[schema(example = "0.00")]
    pub balance: String,
}

impl UserProfile {
    pub fn new(user: User, balance: Option<Decimal>) -> Self {
        Self {
            id: user.id,
            google_id: user.google_id,
            name: user.name,
            email: user.email,
            picture: user.picture_url,
            balance: format_amount(balance.unwrap_or(Decimal::ZERO)),
        }
    }
}

/// Login response consumed by the storefront
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login exitoso")]
    pub message: String,
    #[serde(rename = "sessionToken")]
    pub session_token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_tokens_are_long_and_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn profile_defaults_missing_balance_to_zero() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            google_id: "g-1".into(),
            email: "a@b.com".into(),
            name: "Ana".into(),
            picture_url: None,
            session_token: None,
            created_at: now,
            last_login_at: now,
        };
        let profile = UserProfile::new(user, None);
        assert_eq!(profile.balance, "0.00");
        assert_eq!(profile.google_id, "g-1");
    }
}
