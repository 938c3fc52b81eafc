//! Submissions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar, types::Json,
};
use uuid::Uuid;

use crate::domain::{
    dealers::records::DealerUuid,
    review::ReviewStatus,
    submissions::{
        data::NewSubmission,
        records::{ProjectUuid, SubmissionRecord, SubmissionType, SubmissionUuid},
    },
};

const CREATE_SUBMISSION_SQL: &str = include_str!("../sql/create_submission.sql");
const LIST_SUBMISSIONS_SQL: &str = include_str!("../sql/list_submissions.sql");
const GET_SUBMISSION_SQL: &str = include_str!("../sql/get_submission.sql");
const UPDATE_SUBMISSION_STATUS_SQL: &str = include_str!("../sql/update_submission_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubmissionsRepository;

impl PgSubmissionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_submission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        submission: NewSubmission,
    ) -> Result<SubmissionUuid, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(CREATE_SUBMISSION_SQL)
            .bind(submission.uuid.into_uuid())
            .bind(submission.dealer.into_uuid())
            .bind(submission.submission_type.as_str())
            .bind(submission.distributor)
            .bind(submission.project.map(ProjectUuid::into_uuid))
            .bind(Json(submission.metadata))
            .fetch_one(&mut **tx)
            .await
            .map(SubmissionUuid::from_uuid)
    }

    pub(crate) async fn list_submissions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        dealer: DealerUuid,
        submission_type: Option<SubmissionType>,
    ) -> Result<Vec<SubmissionRecord>, sqlx::Error> {
        query_as::<Postgres, SubmissionRecord>(LIST_SUBMISSIONS_SQL)
            .bind(dealer.into_uuid())
            .bind(submission_type.map(SubmissionType::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_submission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        submission: SubmissionUuid,
    ) -> Result<SubmissionRecord, sqlx::Error> {
        query_as::<Postgres, SubmissionRecord>(GET_SUBMISSION_SQL)
            .bind(submission.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        submission: SubmissionUuid,
        status: ReviewStatus,
    ) -> Result<SubmissionRecord, sqlx::Error> {
        query_as::<Postgres, SubmissionRecord>(UPDATE_SUBMISSION_STATUS_SQL)
            .bind(submission.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_error(
    column: &str,
    error: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

impl<'r> FromRow<'r, PgRow> for SubmissionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: SubmissionUuid::from_uuid(row.try_get("uuid")?),
            dealer_uuid: DealerUuid::from_uuid(row.try_get("dealer_uuid")?),
            submission_type: kind.parse().map_err(|error| decode_error("kind", error))?,
            distributor: row.try_get("distributor")?,
            project_uuid: row
                .try_get::<Option<Uuid>, _>("project_uuid")?
                .map(ProjectUuid::from_uuid),
            status: status.parse().map_err(|error| decode_error("status", error))?,
            metadata: row.try_get::<Json<Value>, _>("metadata")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
