//! Sessions service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionsServiceError {
    /// Unknown session, or one owned by another dealer.
    #[error("session not found")]
    NotFound,

    /// The session timed out and the dealer has been signed out.
    #[error("session has expired")]
    Expired,
}
