//! Submission Data

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{
    dealers::records::{DealerIdentity, DealerUuid},
    numbers::LooseValue,
    submissions::records::{ProjectUuid, SubmissionType, SubmissionUuid},
};

/// One cart line as collected by a dealer form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog id, or a synthetic placeholder such as `cost_<millis>`.
    #[serde(default)]
    pub product_id: LooseValue,

    #[serde(default)]
    pub quantity: LooseValue,

    #[serde(default)]
    pub price: LooseValue,

    /// Used as the price when `price` is absent.
    #[serde(default)]
    pub support_amount: LooseValue,

    /// Fulfilling distributor code; empty means the default distributor.
    #[serde(default)]
    pub distributor: Option<String>,

    /// Line date; falls back to the submission day.
    #[serde(default)]
    pub date: Option<Date>,

    #[serde(default)]
    pub ean: Option<String>,

    #[serde(default)]
    pub product_name: Option<String>,

    /// Device serial, captured for registered products.
    #[serde(default)]
    pub serial_number: Option<String>,
}

/// Extra fields for a purchase order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    #[serde(default)]
    pub comment: Option<String>,
}

/// Reporting period of a sell-out report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalePeriod {
    #[serde(default)]
    pub calendar_week: Option<u8>,

    /// Share of sales made in-house, in percent.
    #[serde(default)]
    pub inhouse_share: Option<f64>,
}

/// Header of a project request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    #[serde(default)]
    pub project_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub customer: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub start: Option<Date>,

    #[serde(default)]
    pub end: Option<Date>,

    #[serde(default)]
    pub comment: Option<String>,

    /// When the project was requested; defaults to now.
    #[serde(default)]
    pub project_date: Option<Timestamp>,
}

/// Support claim header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportDetails {
    #[serde(default)]
    pub support_type: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,
}

/// What is being submitted, with the metadata each kind carries.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionKind {
    Order(OrderDetails),
    Sale(SalePeriod),
    Project(ProjectDetails),
    Support(SupportDetails),
}

impl SubmissionKind {
    #[must_use]
    pub const fn submission_type(&self) -> SubmissionType {
        match self {
            Self::Order(_) => SubmissionType::Order,
            Self::Sale(_) => SubmissionType::Sale,
            Self::Project(_) => SubmissionType::Project,
            Self::Support(_) => SubmissionType::Support,
        }
    }

    /// Metadata stored on every parent submission row.
    ///
    /// Project headers live in their own table, so project submissions carry
    /// no metadata of their own.
    #[must_use]
    pub fn metadata(&self) -> Value {
        let metadata = match self {
            Self::Order(details) => serde_json::to_value(details),
            Self::Sale(period) => serde_json::to_value(period),
            Self::Support(details) => serde_json::to_value(details),
            Self::Project(_) => return json!({}),
        };

        metadata.unwrap_or_else(|_ignored| json!({}))
    }
}

/// A cart submitted in one user action.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSubmission {
    pub kind: SubmissionKind,
    pub items: Vec<CartLine>,
}

/// Outcome for one distributor group, in group order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedGroup {
    pub distributor: String,
    pub submission_uuid: SubmissionUuid,
    pub project_uuid: Option<ProjectUuid>,
}

/// Project row written ahead of project submissions.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub uuid: ProjectUuid,
    pub dealer: DealerIdentity,
    pub details: ProjectDetails,
}

/// Parent submission row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub uuid: SubmissionUuid,
    pub dealer: DealerUuid,
    pub submission_type: SubmissionType,
    pub distributor: String,
    pub project: Option<ProjectUuid>,
    pub metadata: Value,
}

/// Child line row with coerced numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmissionItem {
    pub submission: SubmissionUuid,
    pub product_id: Option<i64>,
    pub quantity: i64,
    pub price: f64,
    pub item_date: Date,
    pub ean: Option<String>,
    pub product_name: Option<String>,
    pub serial_number: Option<String>,
    pub project: Option<ProjectUuid>,
}
