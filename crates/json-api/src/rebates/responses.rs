//! Rebate response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_app::domain::rebates::{
    RebateQuote,
    data::ClaimedProduct,
    records::RebateClaimRecord,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    /// 1 (TV), 2 (TV and soundbar) or 3 (TV, soundbar and subwoofer)
    pub tier: i16,

    /// Rebate amount read from the TV line
    pub amount: f64,
}

impl From<RebateQuote> for QuoteResponse {
    fn from(quote: RebateQuote) -> Self {
        Self {
            tier: quote.tier.level(),
            amount: quote.amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClaimedProductResponse {
    pub product_name: Option<String>,
    pub ean: Option<String>,
    pub category: Option<String>,
    pub qty: i64,
}

impl From<ClaimedProduct> for ClaimedProductResponse {
    fn from(product: ClaimedProduct) -> Self {
        Self {
            product_name: product.product_name,
            ean: product.ean,
            category: product.category,
            qty: product.qty,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClaimResponse {
    pub uuid: Uuid,
    pub tier: i16,
    pub amount: f64,
    pub invoice_path: String,

    /// `pending`, `approved` or `rejected`
    pub status: String,

    pub products: Vec<ClaimedProductResponse>,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RebateClaimRecord> for ClaimResponse {
    fn from(claim: RebateClaimRecord) -> Self {
        Self {
            uuid: claim.uuid.into(),
            tier: claim.tier.level(),
            amount: claim.amount,
            invoice_path: claim.invoice_path,
            status: claim.status.to_string(),
            products: claim.products.into_iter().map(Into::into).collect(),
            comment: claim.comment,
            created_at: claim.created_at.to_string(),
            updated_at: claim.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClaimsResponse {
    /// Newest first
    pub claims: Vec<ClaimResponse>,
}
