//! Dealer Errors

use salvo::http::StatusError;
use tracing::error;

use portal_app::domain::dealers::DealersServiceError;

pub(crate) fn into_status_error(error: DealersServiceError) -> StatusError {
    match error {
        DealersServiceError::NotFound => StatusError::not_found().brief("Dealer not found"),
        other => {
            error!("failed to load dealer: {other}");

            StatusError::internal_server_error()
        }
    }
}
