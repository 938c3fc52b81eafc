//! Rebate Errors

use salvo::http::StatusError;
use tracing::error;

use portal_app::domain::rebates::RebateClaimsServiceError;

pub(crate) fn into_status_error(error: RebateClaimsServiceError) -> StatusError {
    match error {
        RebateClaimsServiceError::InvalidComposition(reason) => {
            StatusError::bad_request().brief(format!("Not a valid rebate bundle: {reason}"))
        }
        RebateClaimsServiceError::MissingInvoice => {
            StatusError::bad_request().brief("An invoice is required")
        }
        RebateClaimsServiceError::NotFound => {
            StatusError::not_found().brief("Rebate claim not found")
        }
        RebateClaimsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Rebate claim already exists")
        }
        RebateClaimsServiceError::InvalidReference
        | RebateClaimsServiceError::MissingRequiredData
        | RebateClaimsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid rebate claim payload")
        }
        RebateClaimsServiceError::Sql(source) => {
            error!("rebate claim storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
