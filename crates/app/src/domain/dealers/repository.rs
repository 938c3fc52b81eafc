//! Dealers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::dealers::{
    data::NewDealer,
    records::{DealerRecord, DealerUuid},
};

const CREATE_DEALER_SQL: &str = include_str!("sql/create_dealer.sql");
const GET_DEALER_SQL: &str = include_str!("sql/get_dealer.sql");

/// PostgreSQL-backed dealers repository.
#[derive(Debug, Clone, Default)]
pub(crate) struct PgDealersRepository;

impl PgDealersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_dealer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        dealer: NewDealer,
    ) -> Result<DealerRecord, sqlx::Error> {
        query_as::<Postgres, DealerRecord>(CREATE_DEALER_SQL)
            .bind(dealer.uuid.into_uuid())
            .bind(dealer.login_nr)
            .bind(dealer.store_name)
            .bind(dealer.email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_dealer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        dealer: DealerUuid,
    ) -> Result<Option<DealerRecord>, sqlx::Error> {
        query_as::<Postgres, DealerRecord>(GET_DEALER_SQL)
            .bind(dealer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for DealerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: DealerUuid::from_uuid(row.try_get("uuid")?),
            login_nr: row.try_get("login_nr")?,
            store_name: row.try_get("store_name")?,
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
