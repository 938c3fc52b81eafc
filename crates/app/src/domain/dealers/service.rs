//! Dealers service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::dealers::{
        data::NewDealer,
        errors::DealersServiceError,
        records::{DealerRecord, DealerUuid},
        repository::PgDealersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgDealersService {
    db: Db,
    repository: PgDealersRepository,
}

impl PgDealersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgDealersRepository::new(),
        }
    }
}

#[async_trait]
impl DealersService for PgDealersService {
    async fn create_dealer(&self, dealer: NewDealer) -> Result<DealerRecord, DealersServiceError> {
        let mut tx = self.db.begin_admin_transaction().await?;

        let created = self.repository.create_dealer(&mut tx, dealer).await?;

        tx.commit().await?;

        info!(dealer_uuid = %created.uuid, "created dealer");

        Ok(created)
    }

    async fn find_dealer(
        &self,
        dealer: DealerUuid,
    ) -> Result<Option<DealerRecord>, DealersServiceError> {
        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let found = self.repository.find_dealer(&mut tx, dealer).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn get_dealer(&self, dealer: DealerUuid) -> Result<DealerRecord, DealersServiceError> {
        self.find_dealer(dealer)
            .await?
            .ok_or(DealersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
/// Dealer account operations.
pub trait DealersService: Send + Sync {
    /// Provision a new dealer account.
    async fn create_dealer(&self, dealer: NewDealer) -> Result<DealerRecord, DealersServiceError>;

    /// Look up an active dealer; `None` when unknown or deleted.
    async fn find_dealer(
        &self,
        dealer: DealerUuid,
    ) -> Result<Option<DealerRecord>, DealersServiceError>;

    /// Look up an active dealer, failing with `NotFound`.
    async fn get_dealer(&self, dealer: DealerUuid) -> Result<DealerRecord, DealersServiceError>;
}
