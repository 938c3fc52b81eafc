//! Submission response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use portal_app::domain::submissions::{
    data::SubmittedGroup,
    records::{ProjectRecord, SubmissionItemRecord, SubmissionRecord, SubmissionWithItems},
};

/// One written distributor group.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmittedGroupResponse {
    pub distributor: String,
    pub submission_uuid: Uuid,
    pub project_uuid: Option<Uuid>,
}

impl From<SubmittedGroup> for SubmittedGroupResponse {
    fn from(group: SubmittedGroup) -> Self {
        Self {
            distributor: group.distributor,
            submission_uuid: group.submission_uuid.into(),
            project_uuid: group.project_uuid.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmissionResponse {
    pub uuid: Uuid,

    /// `order`, `sale`, `project`, `support` or `cashback`
    pub kind: String,

    pub distributor: String,
    pub project_uuid: Option<Uuid>,

    /// `pending`, `approved` or `rejected`
    pub status: String,

    /// Kind-specific header fields
    pub metadata: Value,

    pub created_at: String,
    pub updated_at: String,
}

impl From<SubmissionRecord> for SubmissionResponse {
    fn from(record: SubmissionRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            kind: record.submission_type.to_string(),
            distributor: record.distributor,
            project_uuid: record.project_uuid.map(Into::into),
            status: record.status.to_string(),
            metadata: record.metadata,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmissionItemResponse {
    pub uuid: Uuid,
    pub product_id: Option<i64>,
    pub quantity: i64,
    pub price: f64,
    pub item_date: String,
    pub ean: Option<String>,
    pub product_name: Option<String>,
    pub serial_number: Option<String>,
}

impl From<SubmissionItemRecord> for SubmissionItemResponse {
    fn from(item: SubmissionItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
            item_date: item.item_date.to_string(),
            ean: item.ean,
            product_name: item.product_name,
            serial_number: item.serial_number,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProjectResponse {
    pub uuid: Uuid,
    pub project_type: Option<String>,
    pub name: Option<String>,
    pub customer: Option<String>,
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub comment: Option<String>,
    pub project_date: String,
}

impl From<ProjectRecord> for ProjectResponse {
    fn from(project: ProjectRecord) -> Self {
        Self {
            uuid: project.uuid.into(),
            project_type: project.project_type,
            name: project.project_name,
            customer: project.customer,
            location: project.location,
            start: project.start_date.map(|date| date.to_string()),
            end: project.end_date.map(|date| date.to_string()),
            comment: project.comment,
            project_date: project.project_date.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmissionDetailResponse {
    pub submission: SubmissionResponse,
    pub items: Vec<SubmissionItemResponse>,
    pub project: Option<ProjectResponse>,
}

impl From<SubmissionWithItems> for SubmissionDetailResponse {
    fn from(detail: SubmissionWithItems) -> Self {
        Self {
            submission: detail.submission.into(),
            items: detail.items.into_iter().map(Into::into).collect(),
            project: detail.project.map(Into::into),
        }
    }
}
