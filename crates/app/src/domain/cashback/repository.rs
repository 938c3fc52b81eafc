//! Cashback Claims Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    cashback::records::{CashbackClaimRecord, CashbackClaimUuid, CashbackType},
    dealers::records::DealerUuid,
    submissions::records::SubmissionUuid,
};

const CREATE_CLAIM_SQL: &str = include_str!("sql/create_claim.sql");
const LIST_CLAIMS_SQL: &str = include_str!("sql/list_claims.sql");
const GET_CLAIM_SQL: &str = include_str!("sql/get_claim.sql");

/// Claim row ready to insert under an already written submission.
#[derive(Debug)]
pub(crate) struct CashbackClaimInsert {
    pub uuid: CashbackClaimUuid,
    pub submission: SubmissionUuid,
    pub dealer: DealerUuid,
    pub cashback_type: CashbackType,
    pub amount: f64,
    pub serial_number: String,
    pub soundbar_serial_number: Option<String>,
    pub soundbar_ean: Option<String>,
    pub document_path: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCashbackClaimsRepository;

impl PgCashbackClaimsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        claim: CashbackClaimInsert,
    ) -> Result<CashbackClaimUuid, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(CREATE_CLAIM_SQL)
            .bind(claim.uuid.into_uuid())
            .bind(claim.submission.into_uuid())
            .bind(claim.dealer.into_uuid())
            .bind(claim.cashback_type.as_str())
            .bind(claim.amount)
            .bind(claim.serial_number)
            .bind(claim.soundbar_serial_number)
            .bind(claim.soundbar_ean)
            .bind(claim.document_path)
            .fetch_one(&mut **tx)
            .await
            .map(CashbackClaimUuid::from_uuid)
    }

    pub(crate) async fn list_claims(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        dealer: DealerUuid,
    ) -> Result<Vec<CashbackClaimRecord>, sqlx::Error> {
        query_as::<Postgres, CashbackClaimRecord>(LIST_CLAIMS_SQL)
            .bind(dealer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        claim: CashbackClaimUuid,
    ) -> Result<CashbackClaimRecord, sqlx::Error> {
        query_as::<Postgres, CashbackClaimRecord>(GET_CLAIM_SQL)
            .bind(claim.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for CashbackClaimRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let cashback_type: String = row.try_get("cashback_type")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: CashbackClaimUuid::from_uuid(row.try_get("uuid")?),
            submission_uuid: SubmissionUuid::from_uuid(row.try_get("submission_uuid")?),
            dealer_uuid: DealerUuid::from_uuid(row.try_get("dealer_uuid")?),
            cashback_type: cashback_type
                .parse()
                .map_err(|error| decode_error("cashback_type", error))?,
            amount: row.try_get("amount")?,
            serial_number: row.try_get("serial_number")?,
            soundbar_serial_number: row.try_get("soundbar_serial_number")?,
            soundbar_ean: row.try_get("soundbar_ean")?,
            document_path: row.try_get("document_path")?,
            status: status
                .parse()
                .map_err(|error| decode_error("status", error))?,
            calendar_week: row.try_get("calendar_week")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
