//! Session Errors

use salvo::http::StatusError;

use portal_app::domain::sessions::SessionsServiceError;

pub(crate) fn into_status_error(error: SessionsServiceError) -> StatusError {
    match error {
        SessionsServiceError::NotFound => StatusError::not_found().brief("Session not found"),
        SessionsServiceError::Expired => {
            StatusError::unauthorized().brief("Session expired, please sign in again")
        }
    }
}
