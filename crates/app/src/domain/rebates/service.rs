//! Rebate claims service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        dealers::records::DealerUuid,
        rebates::{
            data::{ClaimedProduct, NewRebateClaim},
            errors::RebateClaimsServiceError,
            records::{RebateClaimRecord, RebateClaimUuid},
            repository::{ClaimInsert, PgRebateClaimsRepository},
            tiers::{RebateLine, RebateQuote, calculate_rebate},
        },
        review::ReviewStatus,
    },
};

#[derive(Debug, Clone)]
pub struct PgRebateClaimsService {
    db: Db,
    repository: PgRebateClaimsRepository,
}

impl PgRebateClaimsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRebateClaimsRepository::new(),
        }
    }
}

#[async_trait]
impl RebateClaimsService for PgRebateClaimsService {
    async fn quote(&self, items: Vec<RebateLine>) -> Result<RebateQuote, RebateClaimsServiceError> {
        Ok(calculate_rebate(&items)?)
    }

    async fn submit_claim(
        &self,
        dealer: DealerUuid,
        claim: NewRebateClaim,
    ) -> Result<RebateClaimRecord, RebateClaimsServiceError> {
        let quote = calculate_rebate(&claim.items).inspect_err(|error| {
            warn!(dealer_uuid = %dealer, %error, "rejected rebate claim");
        })?;

        if claim.invoice_path.trim().is_empty() {
            return Err(RebateClaimsServiceError::MissingInvoice);
        }

        let comment = claim
            .comment
            .filter(|comment| !comment.trim().is_empty())
            .unwrap_or_else(|| format!("Rebate tier {}", quote.tier.level()));

        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let created = self
            .repository
            .create_claim(
                &mut tx,
                ClaimInsert {
                    uuid: RebateClaimUuid::new(),
                    dealer,
                    quote,
                    invoice_path: &claim.invoice_path,
                    products: claim.items.iter().map(ClaimedProduct::from).collect(),
                    comment,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            dealer_uuid = %dealer,
            claim_uuid = %created.uuid,
            tier = quote.tier.level(),
            amount = quote.amount,
            "filed rebate claim"
        );

        Ok(created)
    }

    async fn list_claims(
        &self,
        dealer: DealerUuid,
    ) -> Result<Vec<RebateClaimRecord>, RebateClaimsServiceError> {
        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let claims = self.repository.list_claims(&mut tx, dealer).await?;

        tx.commit().await?;

        Ok(claims)
    }

    async fn get_claim(
        &self,
        dealer: DealerUuid,
        claim: RebateClaimUuid,
    ) -> Result<RebateClaimRecord, RebateClaimsServiceError> {
        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let record = self.repository.get_claim(&mut tx, claim).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn review_claim(
        &self,
        claim: RebateClaimUuid,
        status: ReviewStatus,
    ) -> Result<RebateClaimRecord, RebateClaimsServiceError> {
        let mut tx = self.db.begin_admin_transaction().await?;

        let record = self.repository.update_status(&mut tx, claim, status).await?;

        tx.commit().await?;

        info!(claim_uuid = %claim, %status, "reviewed rebate claim");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait RebateClaimsService: Send + Sync {
    /// Preview the tier and amount for a cart without writing anything.
    async fn quote(&self, items: Vec<RebateLine>) -> Result<RebateQuote, RebateClaimsServiceError>;

    /// Validate the bundle, then file a pending claim for the dealer.
    async fn submit_claim(
        &self,
        dealer: DealerUuid,
        claim: NewRebateClaim,
    ) -> Result<RebateClaimRecord, RebateClaimsServiceError>;

    async fn list_claims(
        &self,
        dealer: DealerUuid,
    ) -> Result<Vec<RebateClaimRecord>, RebateClaimsServiceError>;

    async fn get_claim(
        &self,
        dealer: DealerUuid,
        claim: RebateClaimUuid,
    ) -> Result<RebateClaimRecord, RebateClaimsServiceError>;

    /// Approve or reject a claim. Administrative.
    async fn review_claim(
        &self,
        claim: RebateClaimUuid,
        status: ReviewStatus,
    ) -> Result<RebateClaimRecord, RebateClaimsServiceError>;
}
