//! Submissions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::dealers::DealersServiceError;

#[derive(Debug, Error)]
pub enum SubmissionsServiceError {
    /// No dealer identity was supplied; nothing was written.
    #[error("no dealer identity supplied")]
    MissingDealer,

    /// The cart has no lines; nothing was written.
    #[error("cart is empty")]
    EmptyCart,

    /// The project header could not be written; no submissions were created.
    #[error("failed to create project")]
    ProjectCreation(#[source] Error),

    /// A parent submission could not be written. Earlier groups stay written.
    #[error("failed to write submission for distributor {distributor}")]
    SubmissionWrite {
        distributor: String,
        #[source]
        source: Error,
    },

    /// A group's lines could not be written. Earlier groups stay written.
    #[error("failed to write items for distributor {distributor}")]
    ItemWrite {
        distributor: String,
        #[source]
        source: Error,
    },

    /// Resolving the submitting dealer failed.
    #[error("failed to resolve dealer")]
    Dealer(#[from] DealersServiceError),

    #[error("submission not found")]
    NotFound,

    #[error("submission already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SubmissionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
