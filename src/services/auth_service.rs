//! Authentication service - Google sign-in and session tokens.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::generate_session_token;
use crate::domain::{LoginResponse, User, UserProfile};
use crate::errors::{AppError, AppResult};
use crate::infra::{IdentityVerifier, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify a Google ID token, upsert the user and issue a new session token
    async fn login_with_google(&self, id_token: &str) -> AppResult<LoginResponse>;

    /// Resolve the user owning a session token
    async fn authenticate(&self, session_token: &str) -> AppResult<User>;
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    verifier: Arc<dyn IdentityVerifier>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { uow, verifier }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login_with_google(&self, id_token: &str) -> AppResult<LoginResponse> {
        let id_token = id_token.trim();
        if id_token.is_empty() {
            return Err(AppError::bad_request("Falta el token de Google."));
        }

        let profile = self.verifier.verify(id_token).await?;
        let session_token = generate_session_token();
        let users = self.uow.users();

        let user = match users.find_by_google_id(&profile.google_id).await? {
            Some(existing) => {
                tracing::info!(user_id = %existing.id, "Returning user logged in");
                users
                    .record_login(existing.id, profile, session_token.clone())
                    .await?
            }
            None => {
                let created = users.create(profile, session_token.clone()).await?;
                tracing::info!(user_id = %created.id, "New user registered");

                if let Err(e) = self.uow.wallets().open(&created.google_id).await {
                    tracing::error!(
                        google_id = %created.google_id,
                        error = %e,
                        "Failed to open wallet for new user"
                    );
                }
                created
            }
        };

        let balance = self.uow.wallets().balance_of(&user.google_id).await?;

        Ok(LoginResponse {
            message: "Login exitoso".to_string(),
            session_token,
            user: UserProfile::new(user, balance),
        })
    }

    async fn authenticate(&self, session_token: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_session_token(session_token)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Sesión inválida o expirada. Por favor, vuelve a iniciar sesión.",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GoogleProfile;
    use crate::infra::repositories::{MockUserRepository, MockWalletRepository};
    use crate::infra::MockIdentityVerifier;
    use crate::services::testing::{sample_user, TestUnitOfWork};
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn profile() -> GoogleProfile {
        GoogleProfile {
            google_id: "g-123".into(),
            email: "ana@example.com".into(),
            name: "Ana".into(),
            picture: Some("https://img/ana.png".into()),
        }
    }

    fn verifier() -> Arc<MockIdentityVerifier> {
        let mut verifier = MockIdentityVerifier::new();
        verifier
            .expect_verify()
            .with(eq("id-token"))
            .returning(|_| Ok(profile()));
        Arc::new(verifier)
    }

    #[tokio::test]
    async fn first_login_creates_user_and_one_balance_row() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_google_id().returning(|_| Ok(None));
        users
            .expect_create()
            .times(1)
            .returning(|p, token| {
                let mut user = sample_user(&p.google_id);
                user.session_token = Some(token);
                Ok(user)
            });

        let mut wallets = MockWalletRepository::new();
        wallets
            .expect_open()
            .with(eq("g-123"))
            .times(1)
            .returning(|_| Ok(()));
        wallets
            .expect_balance_of()
            .returning(|_| Ok(Some(Decimal::ZERO)));

        let uow = TestUnitOfWork::default().with_users(users).with_wallets(wallets);
        let service = Authenticator::new(Arc::new(uow), verifier());

        let response = service.login_with_google("id-token").await.unwrap();
        assert_eq!(response.message, "Login exitoso");
        assert_eq!(response.user.balance, "0.00");
        assert_eq!(response.session_token.len(), 64);
    }

    #[tokio::test]
    async fn returning_user_rotates_token_without_new_wallet() {
        let existing = sample_user("g-123");
        let existing_id = existing.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_google_id()
            .returning(move |_| Ok(Some(existing.clone())));
        users
            .expect_record_login()
            .withf(move |id, p, _| *id == existing_id && p.email == "ana@example.com")
            .times(1)
            .returning(|_, p, _| Ok(sample_user(&p.google_id)));
        users.expect_create().never();

        let mut wallets = MockWalletRepository::new();
        wallets.expect_open().never();
        wallets
            .expect_balance_of()
            .returning(|_| Ok(Some(Decimal::new(1250, 2))));

        let uow = TestUnitOfWork::default().with_users(users).with_wallets(wallets);
        let service = Authenticator::new(Arc::new(uow), verifier());

        let response = service.login_with_google("id-token").await.unwrap();
        assert_eq!(response.user.balance, "12.50");
    }

    #[tokio::test]
    async fn wallet_open_failure_is_not_fatal() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_google_id().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|p, _| Ok(sample_user(&p.google_id)));

        let mut wallets = MockWalletRepository::new();
        wallets
            .expect_open()
            .returning(|_| Err(AppError::internal("duplicate key")));
        wallets.expect_balance_of().returning(|_| Ok(None));

        let uow = TestUnitOfWork::default().with_users(users).with_wallets(wallets);
        let service = Authenticator::new(Arc::new(uow), verifier());

        let response = service.login_with_google("id-token").await.unwrap();
        assert_eq!(response.user.balance, "0.00");
    }

    #[tokio::test]
    async fn empty_token_is_bad_request() {
        let service = Authenticator::new(
            Arc::new(TestUnitOfWork::default()),
            Arc::new(MockIdentityVerifier::new()),
        );
        let err = service.login_with_google("").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unknown_session_is_unauthorized() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_session_token()
            .returning(|_| Ok(None));

        let service = Authenticator::new(
            Arc::new(TestUnitOfWork::default().with_users(users)),
            Arc::new(MockIdentityVerifier::new()),
        );
        let err = service.authenticate("stale").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
