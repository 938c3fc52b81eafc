//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, Principal, Role,
        format_api_token, generate_api_token_secret, models::NewApiToken, parse_api_token,
        repository::PgAuthRepository, token_verifier, verifiers_match,
    },
    domain::dealers::records::DealerUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given dealer.
    ///
    /// The raw token is returned once; only its verifier is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_api_token(
        &self,
        dealer: DealerUuid,
        role: Role,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);
        let token_hash = token_verifier(&token_uuid, version, dealer, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                dealer_uuid: dealer,
                version,
                token_hash,
                is_admin: matches!(role, Role::Admin),
                expires_at,
            })
            .await?;

        info!(%token_uuid, dealer_uuid = %dealer, ?role, "issued api token");

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        dealer: DealerUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens(dealer).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        Ok(self.repository.revoke_api_token(token_uuid).await?)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|error| {
            debug!(%error, "rejected malformed bearer token");

            AuthServiceError::NotFound
        })?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let presented = token_verifier(
            &parsed.token_uuid,
            parsed.version,
            token.dealer_uuid,
            &parsed.secret,
        );

        if token.version != parsed.version || !verifiers_match(&token.token_hash, &presented) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort; a failed touch must not fail authentication.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed.token_uuid)
            .await;

        Ok(if token.is_admin {
            Principal::admin(token.dealer_uuid)
        } else {
            Principal::dealer(token.dealer_uuid)
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token into the caller it belongs to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_as_dealer() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx
            .auth
            .issue_api_token(ctx.dealer_uuid, Role::Dealer, None)
            .await?;

        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(principal, Principal::dealer(ctx.dealer_uuid));
        assert!(!issued.metadata.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn admin_token_authenticates_as_admin() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx
            .auth
            .issue_api_token(ctx.dealer_uuid, Role::Admin, None)
            .await?;

        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert!(principal.is_admin());

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx
            .auth
            .issue_api_token(ctx.dealer_uuid, Role::Dealer, None)
            .await?;

        let mut tampered = issued.token.clone();
        let last = if tampered.ends_with('0') { "1" } else { "0" };
        tampered.replace_range(tampered.len() - 1.., last);

        let result = ctx.auth.authenticate_bearer(&tampered).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx
            .auth
            .issue_api_token(ctx.dealer_uuid, Role::Dealer, None)
            .await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(
            !ctx.auth.revoke_api_token(issued.metadata.uuid).await?,
            "second revoke is a no-op"
        );

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let expired = Timestamp::now() - jiff::SignedDuration::from_secs(60);

        let issued = ctx
            .auth
            .issue_api_token(ctx.dealer_uuid, Role::Dealer, Some(expired))
            .await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn list_returns_dealer_tokens() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth
            .issue_api_token(ctx.dealer_uuid, Role::Dealer, None)
            .await?;
        ctx.auth
            .issue_api_token(ctx.dealer_uuid, Role::Dealer, None)
            .await?;

        let tokens = ctx.auth.list_api_tokens(ctx.dealer_uuid).await?;

        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|token| token.dealer_uuid == ctx.dealer_uuid));

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_dealer_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .auth
            .issue_api_token(DealerUuid::from_uuid(Uuid::now_v7()), Role::Dealer, None)
            .await;

        assert!(matches!(result, Err(AuthServiceError::UnknownDealer)));

        Ok(())
    }
}
