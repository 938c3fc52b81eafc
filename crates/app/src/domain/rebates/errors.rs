//! Rebate claims service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::rebates::tiers::InvalidCompositionError;

#[derive(Debug, Error)]
pub enum RebateClaimsServiceError {
    /// The cart is not a valid rebate bundle; nothing was written.
    #[error(transparent)]
    InvalidComposition(#[from] InvalidCompositionError),

    /// No invoice was attached to the claim.
    #[error("an invoice is required")]
    MissingInvoice,

    #[error("rebate claim not found")]
    NotFound,

    #[error("rebate claim already exists")]
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

impl From<Error> for RebateClaimsServiceError {
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
