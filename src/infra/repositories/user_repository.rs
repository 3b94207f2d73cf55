//! User repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{GoogleProfile, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>>;

    /// Resolve the owner of a session token
    async fn find_by_session_token(&self, token: &str) -> AppResult<Option<User>>;

    /// Insert a first-time user holding a fresh session token
    async fn create(&self, profile: GoogleProfile, session_token: String) -> AppResult<User>;

    /// Refresh profile data, stamp the login and rotate the session token
    async fn record_login(
        &self,
        id: Uuid,
        profile: GoogleProfile,
        session_token: String,
    ) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_session_token(&self, token: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::SessionToken.eq(token))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, profile: GoogleProfile, session_token: String) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            google_id: Set(profile.google_id),
            email: Set(profile.email),
            name: Set(profile.name),
            picture_url: Set(profile.picture),
            session_token: Set(Some(session_token)),
            created_at: Set(now),
            last_login_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn record_login(
        &self,
        id: Uuid,
        profile: GoogleProfile,
        session_token: String,
    ) -> AppResult<User> {
        let active = ActiveModel {
            id: Set(id),
            email: Set(profile.email),
            name: Set(profile.name),
            picture_url: Set(profile.picture),
            session_token: Set(Some(session_token)),
            last_login_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}
