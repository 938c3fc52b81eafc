//! Submission Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod review;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use portal_app::domain::{
        dealers::records::DealerUuid,
        review::ReviewStatus,
        submissions::records::{SubmissionRecord, SubmissionType, SubmissionUuid},
    };
    use serde_json::json;

    pub(crate) fn make_submission(
        uuid: SubmissionUuid,
        dealer: DealerUuid,
        submission_type: SubmissionType,
    ) -> SubmissionRecord {
        SubmissionRecord {
            uuid,
            dealer_uuid: dealer,
            submission_type,
            distributor: "ep".to_string(),
            project_uuid: None,
            status: ReviewStatus::Pending,
            metadata: json!({ "comment": null }),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
