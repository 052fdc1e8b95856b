use std::sync::Arc;

use uuid::Uuid;

use crate::auth::errors::AuthError;
use crate::auth::token::TokenService;
use crate::config::Config;
use crate::error::AppError;
use crate::models::Principal;
use crate::store::UserStore;

const BEARER_PREFIX: &str = "Bearer ";

/// Pulls the token out of an `Authorization` header value.
///
/// Returns `None` when the header is absent, lacks the `Bearer ` prefix, or
/// carries nothing after it.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Turns a bearer credential into a resolved [`Principal`].
///
/// Holds only read-only state: the token service and a store handle.
/// Each call verifies from scratch; nothing is cached between requests.
pub struct Authenticator {
    tokens: TokenService,
    store: Arc<dyn UserStore>,
    expose_internal_errors: bool,
}

impl Authenticator {
    pub fn new(
        tokens: TokenService,
        store: Arc<dyn UserStore>,
        expose_internal_errors: bool,
    ) -> Self {
        Self {
            tokens,
            store,
            expose_internal_errors,
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn UserStore>) -> Self {
        Self::new(
            TokenService::new(&config.jwt_secret, config.token_leeway_secs),
            store,
            config.app_env.is_development(),
        )
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verifies the credential in `authorization` and loads its principal.
    ///
    /// The store is only consulted once the token has passed verification.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        let token = extract_bearer(authorization);
        log::debug!(
            "Auth middleware - token received: {}",
            if token.is_some() { "yes" } else { "no" }
        );
        let token = token.ok_or(AuthError::NoToken)?;

        let claims = self.tokens.verify(token)?;

        // An id that cannot name a stored user is no different from an unknown one.
        let id = Uuid::parse_str(&claims.id).map_err(|_| AuthError::InvalidToken)?;

        let principal = self
            .store
            .find_principal(id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidToken)?;

        log::info!("User authenticated: {}", principal.email);
        Ok(principal)
    }

    /// Logs the failure and converts it into the response error.
    pub fn reject(&self, err: AuthError) -> AppError {
        match &err {
            AuthError::Internal(detail) => log::error!("Auth middleware error: {}", detail),
            other => log::warn!("Authentication rejected: {}", other),
        }
        err.into_app_error(self.expose_internal_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserRecord};
    use crate::store::MemoryUserStore;
    use chrono::Duration;

    const SECRET: &str = "authenticator_test_secret";

    async fn setup() -> (Authenticator, Arc<MemoryUserStore>, Uuid) {
        let store = Arc::new(MemoryUserStore::new());
        let id = store
            .insert(UserRecord::new("Ama", "a@b.com", "secret-hash", Role::Client))
            .await;
        let authenticator = Authenticator::new(TokenService::new(SECRET, 0), store.clone(), false);
        (authenticator, store, id)
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer(Some("Bearer   abc ")), Some("abc"));
        assert_eq!(extract_bearer(None), None);
        assert_eq!(extract_bearer(Some("abc.def")), None);
        assert_eq!(extract_bearer(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(Some("bearer abc")), None);
        assert_eq!(extract_bearer(Some("Bearer ")), None);
        assert_eq!(extract_bearer(Some("Bearer")), None);
    }

    #[actix_rt::test]
    async fn test_valid_token_resolves_principal() {
        let (authenticator, _store, id) = setup().await;
        let token = authenticator.tokens().issue_default(&id.to_string()).unwrap();

        let principal = authenticator
            .authenticate(Some(&format!("Bearer {}", token)))
            .await
            .unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.email, "a@b.com");
    }

    #[actix_rt::test]
    async fn test_failure_classification() {
        let (authenticator, store, id) = setup().await;

        assert_eq!(authenticator.authenticate(None).await, Err(AuthError::NoToken));
        assert_eq!(
            authenticator.authenticate(Some("Bearer garbage")).await,
            Err(AuthError::InvalidToken)
        );

        let expired = authenticator
            .tokens()
            .issue(&id.to_string(), Duration::seconds(-1))
            .unwrap();
        assert_eq!(
            authenticator.authenticate(Some(&format!("Bearer {}", expired))).await,
            Err(AuthError::TokenExpired)
        );

        let not_a_uuid = authenticator.tokens().issue_default("u1").unwrap();
        assert_eq!(
            authenticator.authenticate(Some(&format!("Bearer {}", not_a_uuid))).await,
            Err(AuthError::InvalidToken)
        );

        let token = authenticator.tokens().issue_default(&id.to_string()).unwrap();
        store.remove(id).await;
        assert_eq!(
            authenticator.authenticate(Some(&format!("Bearer {}", token))).await,
            Err(AuthError::InvalidToken)
        );
    }

    #[actix_rt::test]
    async fn test_reject_hides_internal_detail() {
        let (authenticator, _store, _id) = setup().await;
        match authenticator.reject(AuthError::Internal("boom".into())) {
            AppError::InternalServerError { detail, .. } => assert!(detail.is_none()),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(
            authenticator.reject(AuthError::TokenExpired),
            AppError::Unauthorized(msg) if msg == "Token expired"
        ));
    }

    #[test]
    fn test_from_config_exposes_detail_only_in_development() {
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let cases = [(None, false), (Some("production"), false), (Some("dev"), true)];
        for (app_env, expose) in cases {
            let config = Config::from_vars(|key| match key {
                "DATABASE_URL" => Some("postgres://test".to_string()),
                "JWT_SECRET" => Some(SECRET.to_string()),
                "APP_ENV" => app_env.map(str::to_string),
                _ => None,
            })
            .unwrap();

            let authenticator = Authenticator::from_config(&config, Arc::clone(&store));
            match authenticator.reject(AuthError::Internal("pool timed out".into())) {
                AppError::InternalServerError { detail, .. } => {
                    assert_eq!(detail.is_some(), expose, "APP_ENV={:?}", app_env)
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }
}
