//! Google ID token verification.
//!
//! Tokens are checked locally against Google's published signing keys,
//! which are fetched once and reused until they go stale.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tokio::sync::RwLock;

use crate::config::{GOOGLE_ISSUERS, GOOGLE_JWKS_TTL_SECONDS, GOOGLE_JWKS_URL};
use crate::domain::GoogleProfile;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const INVALID_TOKEN: &str = "Token de Google inválido o expirado.";

/// Verifies third-party identity tokens.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Validate the token and return the identity it asserts
    async fn verify(&self, id_token: &str) -> AppResult<GoogleProfile>;
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: DateTime<Utc>,
}

/// Google ID token verifier (RS256, audience = our OAuth client id).
pub struct GoogleVerifier {
    client: reqwest::Client,
    client_id: String,
    jwks_url: String,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleVerifier {
    pub fn new(client: reqwest::Client, client_id: impl Into<String>) -> Self {
        Self {
            client,
            client_id: client_id.into(),
            jwks_url: GOOGLE_JWKS_URL.to_string(),
            cache: RwLock::new(None),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.set_issuer(GOOGLE_ISSUERS);
        validation
    }

    async fn fetch_keys(&self) -> AppResult<JwkSet> {
        tracing::debug!(url = %self.jwks_url, "Fetching Google signing keys");
        let keys = self
            .client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;
        Ok(keys)
    }

    /// Signing key for `kid`, refetching when the cache is stale or lacks it.
    async fn key_for(&self, kid: &str) -> AppResult<DecodingKey> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                let fresh = Utc::now() - cached.fetched_at < Duration::seconds(GOOGLE_JWKS_TTL_SECONDS);
                if let (true, Some(jwk)) = (fresh, cached.keys.find(kid)) {
                    return DecodingKey::from_jwk(jwk)
                        .map_err(|e| AppError::internal(format!("Unusable Google key: {e}")));
                }
            }
        }

        let keys = self.fetch_keys().await?;
        let key = match keys.find(kid) {
            Some(jwk) => DecodingKey::from_jwk(jwk)
                .map_err(|e| AppError::internal(format!("Unusable Google key: {e}")))?,
            None => {
                tracing::warn!(kid = %kid, "ID token signed with unknown key");
                return Err(AppError::unauthorized(INVALID_TOKEN));
            }
        };

        *self.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Utc::now(),
        });
        Ok(key)
    }
}

#[async_trait]
impl IdentityVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> AppResult<GoogleProfile> {
        if self.client_id.is_empty() {
            return Err(AppError::internal("GOOGLE_CLIENT_ID is not configured"));
        }

        let header = decode_header(id_token).map_err(|e| {
            tracing::debug!(error = %e, "Malformed ID token");
            AppError::unauthorized(INVALID_TOKEN)
        })?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN))?;

        let key = self.key_for(&kid).await?;

        let data = decode::<GoogleProfile>(id_token, &key, &self.validation()).map_err(|e| {
            tracing::info!(error = %e, "Rejected Google ID token");
            AppError::unauthorized(INVALID_TOKEN)
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_garbage_without_network() {
        let verifier = GoogleVerifier::new(reqwest::Client::new(), "client-id");
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn requires_client_id() {
        let verifier = GoogleVerifier::new(reqwest::Client::new(), "");
        let err = verifier.verify("a.b.c").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
