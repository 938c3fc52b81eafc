//! Cashback claims service.

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        cashback::{
            data::{NewCashbackClaim, cashback_metadata, non_blank},
            errors::CashbackClaimsServiceError,
            records::{CashbackClaimRecord, CashbackClaimUuid},
            repository::{CashbackClaimInsert, PgCashbackClaimsRepository},
        },
        dealers::records::DealerUuid,
        numbers::safe_number,
        submissions::{
            DEFAULT_DISTRIBUTOR,
            data::NewSubmission,
            records::{SubmissionType, SubmissionUuid},
            repositories::PgSubmissionsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCashbackClaimsService {
    db: Db,
    submissions: PgSubmissionsRepository,
    repository: PgCashbackClaimsRepository,
}

impl PgCashbackClaimsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            submissions: PgSubmissionsRepository::new(),
            repository: PgCashbackClaimsRepository::new(),
        }
    }
}

#[async_trait]
impl CashbackClaimsService for PgCashbackClaimsService {
    async fn submit_claim(
        &self,
        dealer: DealerUuid,
        claim: NewCashbackClaim,
    ) -> Result<CashbackClaimRecord, CashbackClaimsServiceError> {
        let amount = safe_number(&claim.amount);

        if amount <= 0.0 {
            warn!(dealer_uuid = %dealer, "rejected cashback claim without a positive amount");

            return Err(CashbackClaimsServiceError::InvalidAmount);
        }

        let serial_number = non_blank(Some(claim.serial_number.as_str()))
            .ok_or(CashbackClaimsServiceError::MissingSerialNumber)?;

        let (soundbar_serial_number, soundbar_ean) = claim.soundbar();
        let today = Zoned::now().date();

        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let submission = self
            .submissions
            .create_submission(
                &mut tx,
                NewSubmission {
                    uuid: SubmissionUuid::new(),
                    dealer,
                    submission_type: SubmissionType::Cashback,
                    distributor: DEFAULT_DISTRIBUTOR.to_string(),
                    project: None,
                    metadata: cashback_metadata(today),
                },
            )
            .await?;

        let uuid = self
            .repository
            .create_claim(
                &mut tx,
                CashbackClaimInsert {
                    uuid: CashbackClaimUuid::new(),
                    submission,
                    dealer,
                    cashback_type: claim.cashback_type,
                    amount,
                    serial_number,
                    soundbar_serial_number,
                    soundbar_ean,
                    document_path: non_blank(claim.document_path.as_deref()),
                },
            )
            .await?;

        let created = self.repository.get_claim(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(
            dealer_uuid = %dealer,
            claim_uuid = %created.uuid,
            submission_uuid = %submission,
            cashback_type = %created.cashback_type,
            amount,
            "filed cashback claim"
        );

        Ok(created)
    }

    async fn list_claims(
        &self,
        dealer: DealerUuid,
    ) -> Result<Vec<CashbackClaimRecord>, CashbackClaimsServiceError> {
        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let claims = self.repository.list_claims(&mut tx, dealer).await?;

        tx.commit().await?;

        Ok(claims)
    }

    async fn get_claim(
        &self,
        dealer: DealerUuid,
        claim: CashbackClaimUuid,
    ) -> Result<CashbackClaimRecord, CashbackClaimsServiceError> {
        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let record = self.repository.get_claim(&mut tx, claim).await?;

        tx.commit().await?;

        Ok(record)
    }
}

/// Cashback claims. Review goes through the parent submission's status.
#[automock]
#[async_trait]
pub trait CashbackClaimsService: Send + Sync {
    /// Validate the claim, then file it under a new `cashback` submission.
    async fn submit_claim(
        &self,
        dealer: DealerUuid,
        claim: NewCashbackClaim,
    ) -> Result<CashbackClaimRecord, CashbackClaimsServiceError>;

    async fn list_claims(
        &self,
        dealer: DealerUuid,
    ) -> Result<Vec<CashbackClaimRecord>, CashbackClaimsServiceError>;

    async fn get_claim(
        &self,
        dealer: DealerUuid,
        claim: CashbackClaimUuid,
    ) -> Result<CashbackClaimRecord, CashbackClaimsServiceError>;
}
