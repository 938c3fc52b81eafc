//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        cashback::{CashbackClaimsService, PgCashbackClaimsService},
        dealers::{DealersService, PgDealersService},
        rebates::{PgRebateClaimsService, RebateClaimsService},
        sessions::{InMemorySessionsService, SessionPolicy, SessionsService},
        submissions::{PgSubmissionsService, SubmissionsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("database role bypasses row-level security; connect as the app role")]
    RlsNotEnforced,
}

#[derive(Clone)]
pub struct AppContext {
    pub dealers: Arc<dyn DealersService>,
    pub auth: Arc<dyn AuthService>,
    pub submissions: Arc<dyn SubmissionsService>,
    pub rebates: Arc<dyn RebateClaimsService>,
    pub cashback: Arc<dyn CashbackClaimsService>,
    pub sessions: Arc<dyn SessionsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Must be called inside a Tokio runtime; the sessions service spawns its
    /// reaper task here.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// connected role would bypass row-level security.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        session_policy: SessionPolicy,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with_limit(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if database::role_bypasses_rls(&pool)
            .await
            .map_err(AppInitError::Database)?
        {
            return Err(AppInitError::RlsNotEnforced);
        }

        let db = Db::new(pool.clone());

        Ok(Self {
            dealers: Arc::new(PgDealersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(pool)),
            submissions: Arc::new(PgSubmissionsService::new(db.clone())),
            rebates: Arc::new(PgRebateClaimsService::new(db.clone())),
            cashback: Arc::new(PgCashbackClaimsService::new(db)),
            sessions: Arc::new(InMemorySessionsService::new(session_policy)),
        })
    }
}
