//! Submission Errors

use salvo::http::StatusError;
use tracing::error;

use portal_app::domain::submissions::SubmissionsServiceError;

pub(crate) fn into_status_error(error: SubmissionsServiceError) -> StatusError {
    match error {
        SubmissionsServiceError::MissingDealer => {
            StatusError::unprocessable_entity().brief("No dealer found for this account")
        }
        SubmissionsServiceError::EmptyCart => {
            StatusError::bad_request().brief("The cart has no items")
        }
        SubmissionsServiceError::NotFound => {
            StatusError::not_found().brief("Submission not found")
        }
        SubmissionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Submission already exists")
        }
        SubmissionsServiceError::InvalidReference
        | SubmissionsServiceError::MissingRequiredData
        | SubmissionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid submission payload")
        }
        SubmissionsServiceError::ProjectCreation(source) => {
            error!("failed to create project: {source}");

            StatusError::internal_server_error()
        }
        SubmissionsServiceError::SubmissionWrite {
            distributor,
            source,
        } => {
            error!(%distributor, "failed to write submission: {source}");

            StatusError::internal_server_error().brief(partial_write_brief(&distributor))
        }
        SubmissionsServiceError::ItemWrite {
            distributor,
            source,
        } => {
            error!(%distributor, "failed to write submission items: {source}");

            StatusError::internal_server_error().brief(partial_write_brief(&distributor))
        }
        SubmissionsServiceError::Dealer(source) => {
            error!("failed to resolve dealer: {source}");

            StatusError::internal_server_error()
        }
        SubmissionsServiceError::Sql(source) => {
            error!("submission storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Brief for a group that failed after earlier groups were committed.
fn partial_write_brief(distributor: &str) -> String {
    format!(
        "Failed to save the group for distributor {distributor}; \
         groups ahead of it in cart order were saved"
    )
}
