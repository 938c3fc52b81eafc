//! Cashback response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_app::domain::cashback::records::CashbackClaimRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CashbackClaimResponse {
    pub uuid: Uuid,

    /// Parent submission; review it to approve or reject the claim
    pub submission_uuid: Uuid,

    /// `single` or `double`
    pub cashback_type: String,

    pub amount: f64,
    pub serial_number: String,
    pub soundbar_serial_number: Option<String>,
    pub soundbar_ean: Option<String>,
    pub document_path: Option<String>,

    /// `pending`, `approved` or `rejected`
    pub status: String,

    /// ISO week the claim was filed in
    pub calendar_week: Option<i16>,

    pub created_at: String,
}

impl From<CashbackClaimRecord> for CashbackClaimResponse {
    fn from(claim: CashbackClaimRecord) -> Self {
        Self {
            uuid: claim.uuid.into(),
            submission_uuid: claim.submission_uuid.into(),
            cashback_type: claim.cashback_type.to_string(),
            amount: claim.amount,
            serial_number: claim.serial_number,
            soundbar_serial_number: claim.soundbar_serial_number,
            soundbar_ean: claim.soundbar_ean,
            document_path: claim.document_path,
            status: claim.status.to_string(),
            calendar_week: claim.calendar_week,
            created_at: claim.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CashbackClaimsResponse {
    pub claims: Vec<CashbackClaimResponse>,
}
