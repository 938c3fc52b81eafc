//! Back-office review requests shared by submissions and rebate claims.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};

use portal_app::domain::review::ReviewStatus;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewRequest {
    /// One of `pending`, `approved`, `rejected`
    pub status: String,
}

impl ReviewRequest {
    pub(crate) fn status(&self) -> Result<ReviewStatus, StatusError> {
        self.status
            .parse::<ReviewStatus>()
            .or_400("status must be pending, approved or rejected")
    }
}
