//! Cashback Errors

use salvo::http::StatusError;
use tracing::error;

use portal_app::domain::cashback::CashbackClaimsServiceError;

pub(crate) fn into_status_error(error: CashbackClaimsServiceError) -> StatusError {
    match error {
        CashbackClaimsServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Cashback amount must be positive")
        }
        CashbackClaimsServiceError::MissingSerialNumber => {
            StatusError::bad_request().brief("A serial number is required")
        }
        CashbackClaimsServiceError::NotFound => {
            StatusError::not_found().brief("Cashback claim not found")
        }
        CashbackClaimsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cashback claim already exists")
        }
        CashbackClaimsServiceError::InvalidReference
        | CashbackClaimsServiceError::MissingRequiredData
        | CashbackClaimsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cashback claim payload")
        }
        CashbackClaimsServiceError::Sql(source) => {
            error!("cashback claim storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
