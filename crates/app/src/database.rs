//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions, query, query_scalar};

use crate::domain::dealers::records::DealerUuid;

/// SQL used to set the dealer context for row-level security.
pub const SET_DEALER_CONTEXT_SQL: &str =
    "SELECT set_config('app.current_dealer_uuid', $1, true)";

/// SQL used to switch a transaction into the administrative role.
pub const SET_ADMIN_CONTEXT_SQL: &str = "SELECT set_config('app.current_role', 'admin', true)";

/// Pool size used by the operator CLI.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const CURRENT_ROLE_BYPASSES_RLS_SQL: &str =
    "SELECT rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction scoped to a single dealer's rows.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting dealer context fails.
    pub async fn begin_dealer_transaction(
        &self,
        dealer: DealerUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_DEALER_CONTEXT_SQL)
            .bind(dealer.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Begin a transaction that can see and review every dealer's rows.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting the role fails.
    pub async fn begin_admin_transaction(
        &self,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_ADMIN_CONTEXT_SQL).execute(&mut *tx).await?;

        Ok(tx)
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect_with_limit(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect to `PostgreSQL` with at most `max_connections` pooled connections.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with_limit(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await
}

/// Whether the connected role can bypass row-level security.
///
/// Superusers and `BYPASSRLS` roles ignore every dealer policy, so the
/// application refuses to serve requests through them.
///
/// # Errors
///
/// Returns an error if the role lookup fails.
pub async fn role_bypasses_rls(pool: &PgPool) -> Result<bool, sqlx::Error> {
    query_scalar(CURRENT_ROLE_BYPASSES_RLS_SQL)
        .fetch_one(pool)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
