//! Rebate Claims Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::domain::{
    dealers::records::DealerUuid,
    rebates::{
        data::ClaimedProduct,
        records::{RebateClaimRecord, RebateClaimUuid},
        tiers::{RebateQuote, RebateTier},
    },
    review::ReviewStatus,
};

const CREATE_CLAIM_SQL: &str = include_str!("sql/create_claim.sql");
const LIST_CLAIMS_SQL: &str = include_str!("sql/list_claims.sql");
const GET_CLAIM_SQL: &str = include_str!("sql/get_claim.sql");
const UPDATE_CLAIM_STATUS_SQL: &str = include_str!("sql/update_claim_status.sql");

/// Claim row ready to insert.
#[derive(Debug)]
pub(crate) struct ClaimInsert<'a> {
    pub uuid: RebateClaimUuid,
    pub dealer: DealerUuid,
    pub quote: RebateQuote,
    pub invoice_path: &'a str,
    pub products: Vec<ClaimedProduct>,
    pub comment: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRebateClaimsRepository;

impl PgRebateClaimsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        claim: ClaimInsert<'_>,
    ) -> Result<RebateClaimRecord, sqlx::Error> {
        query_as::<Postgres, RebateClaimRecord>(CREATE_CLAIM_SQL)
            .bind(claim.uuid.into_uuid())
            .bind(claim.dealer.into_uuid())
            .bind(claim.quote.tier.level())
            .bind(claim.quote.amount)
            .bind(claim.invoice_path)
            .bind(Json(claim.products))
            .bind(claim.comment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_claims(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        dealer: DealerUuid,
    ) -> Result<Vec<RebateClaimRecord>, sqlx::Error> {
        query_as::<Postgres, RebateClaimRecord>(LIST_CLAIMS_SQL)
            .bind(dealer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_claim(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        claim: RebateClaimUuid,
    ) -> Result<RebateClaimRecord, sqlx::Error> {
        query_as::<Postgres, RebateClaimRecord>(GET_CLAIM_SQL)
            .bind(claim.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        claim: RebateClaimUuid,
        status: ReviewStatus,
    ) -> Result<RebateClaimRecord, sqlx::Error> {
        query_as::<Postgres, RebateClaimRecord>(UPDATE_CLAIM_STATUS_SQL)
            .bind(claim.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RebateClaimRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let level: i16 = row.try_get("tier")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: RebateClaimUuid::from_uuid(row.try_get("uuid")?),
            dealer_uuid: DealerUuid::from_uuid(row.try_get("dealer_uuid")?),
            tier: RebateTier::from_level(level).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "tier".to_string(),
                source: format!("unknown rebate tier {level}").into(),
            })?,
            amount: row.try_get("amount")?,
            invoice_path: row.try_get("invoice_path")?,
            status: status.parse().map_err(|error| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(error),
            })?,
            products: row.try_get::<Json<Vec<ClaimedProduct>>, _>("products")?.0,
            comment: row.try_get("comment")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
