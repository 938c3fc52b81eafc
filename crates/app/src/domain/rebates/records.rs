//! Rebate Claim Records

use jiff::Timestamp;

use crate::{
    domain::{
        dealers::records::DealerUuid,
        rebates::{data::ClaimedProduct, tiers::RebateTier},
        review::ReviewStatus,
    },
    uuids::TypedUuid,
};

/// Rebate Claim UUID
pub type RebateClaimUuid = TypedUuid<RebateClaimRecord>;

/// Rebate Claim Record
#[derive(Debug, Clone, PartialEq)]
pub struct RebateClaimRecord {
    pub uuid: RebateClaimUuid,
    pub dealer_uuid: DealerUuid,
    pub tier: RebateTier,
    pub amount: f64,
    pub invoice_path: String,
    pub status: ReviewStatus,
    pub products: Vec<ClaimedProduct>,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
