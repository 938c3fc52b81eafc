//! Submission Records

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date};
use serde_json::Value;
use thiserror::Error;

use crate::{
    domain::{dealers::records::DealerUuid, review::ReviewStatus},
    uuids::TypedUuid,
};

/// Submission UUID
pub type SubmissionUuid = TypedUuid<SubmissionRecord>;

/// Project UUID
pub type ProjectUuid = TypedUuid<ProjectRecord>;

/// Submission Item UUID
pub type SubmissionItemUuid = TypedUuid<SubmissionItemRecord>;

/// Stored discriminant of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionType {
    Order,
    Sale,
    Project,
    Support,

    /// Parent row of a cashback claim; never written by the grouped writer.
    Cashback,
}

impl SubmissionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Sale => "sale",
            Self::Project => "project",
            Self::Support => "support",
            Self::Cashback => "cashback",
        }
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown submission type: {0}")]
pub struct UnknownSubmissionType(pub String);

impl FromStr for SubmissionType {
    type Err = UnknownSubmissionType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "order" => Ok(Self::Order),
            "sale" => Ok(Self::Sale),
            "project" => Ok(Self::Project),
            "support" => Ok(Self::Support),
            "cashback" => Ok(Self::Cashback),
            other => Err(UnknownSubmissionType(other.to_string())),
        }
    }
}

/// Submission Record
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    pub uuid: SubmissionUuid,
    pub dealer_uuid: DealerUuid,
    pub submission_type: SubmissionType,
    pub distributor: String,
    pub project_uuid: Option<ProjectUuid>,
    pub status: ReviewStatus,
    pub metadata: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Submission Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionItemRecord {
    pub uuid: SubmissionItemUuid,
    pub submission_uuid: SubmissionUuid,
    pub product_id: Option<i64>,
    pub quantity: i64,
    pub price: f64,
    pub item_date: Date,
    pub ean: Option<String>,
    pub product_name: Option<String>,
    pub serial_number: Option<String>,
    pub project_uuid: Option<ProjectUuid>,
}

/// A submission together with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionWithItems {
    pub submission: SubmissionRecord,
    pub items: Vec<SubmissionItemRecord>,

    /// Linked project header, for project submissions.
    pub project: Option<ProjectRecord>,
}

/// Project Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub uuid: ProjectUuid,
    pub dealer_uuid: DealerUuid,
    pub project_type: Option<String>,
    pub project_name: Option<String>,
    pub customer: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub comment: Option<String>,
    pub project_date: Timestamp,
}
