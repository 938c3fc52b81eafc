//! Rebate request bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use portal_app::domain::rebates::{RebateLine, data::NewRebateClaim};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct RebateLineRequest {
    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default)]
    pub ean: Option<String>,

    /// Decides whether the line is a TV, soundbar or subwoofer
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub group: Option<String>,

    /// Tier 1 amount on the TV line
    #[serde(default)]
    pub base_amount: Value,

    /// Tier 2 amount on the TV line
    #[serde(default)]
    pub double_amount: Value,

    /// Tier 3 amount on the TV line
    #[serde(default)]
    pub triple_amount: Value,
}

impl From<RebateLineRequest> for RebateLine {
    fn from(line: RebateLineRequest) -> Self {
        Self {
            product_name: line.product_name,
            ean: line.ean,
            category: line.category,
            group: line.group,
            base_amount: line.base_amount.into(),
            double_amount: line.double_amount.into(),
            triple_amount: line.triple_amount.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteRequest {
    #[serde(default)]
    pub items: Vec<RebateLineRequest>,
}

impl QuoteRequest {
    pub(crate) fn into_lines(self) -> Vec<RebateLine> {
        self.items.into_iter().map(Into::into).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateClaimRequest {
    #[serde(default)]
    pub items: Vec<RebateLineRequest>,

    /// Where the uploaded invoice was stored
    #[serde(default)]
    pub invoice_path: String,

    #[serde(default)]
    pub comment: Option<String>,
}

impl From<CreateClaimRequest> for NewRebateClaim {
    fn from(request: CreateClaimRequest) -> Self {
        Self {
            items: request.items.into_iter().map(Into::into).collect(),
            invoice_path: request.invoice_path,
            comment: request.comment,
        }
    }
}
