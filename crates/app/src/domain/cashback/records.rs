//! Cashback Claim Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        dealers::records::DealerUuid, review::ReviewStatus, submissions::records::SubmissionUuid,
    },
    uuids::TypedUuid,
};

/// Cashback Claim UUID
pub type CashbackClaimUuid = TypedUuid<CashbackClaimRecord>;

/// Which promotion the claim is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CashbackType {
    /// Device alone.
    Single,

    /// Device bought together with a soundbar.
    Double,
}

impl CashbackType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for CashbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown cashback type: {0}")]
pub struct UnknownCashbackType(pub String);

impl FromStr for CashbackType {
    type Err = UnknownCashbackType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            other => Err(UnknownCashbackType(other.to_string())),
        }
    }
}

/// Cashback Claim Record
#[derive(Debug, Clone, PartialEq)]
pub struct CashbackClaimRecord {
    pub uuid: CashbackClaimUuid,
    pub submission_uuid: SubmissionUuid,
    pub dealer_uuid: DealerUuid,
    pub cashback_type: CashbackType,
    pub amount: f64,
    pub serial_number: String,
    pub soundbar_serial_number: Option<String>,
    pub soundbar_ean: Option<String>,
    pub document_path: Option<String>,

    /// Status of the parent submission.
    pub status: ReviewStatus,

    /// ISO week the claim was filed in.
    pub calendar_week: Option<i16>,

    pub created_at: Timestamp,
}
