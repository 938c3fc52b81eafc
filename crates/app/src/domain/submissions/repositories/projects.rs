//! Projects Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    dealers::records::DealerUuid,
    submissions::{
        data::NewProject,
        records::{ProjectRecord, ProjectUuid},
    },
};

const CREATE_PROJECT_SQL: &str = include_str!("../sql/create_project.sql");
const GET_PROJECT_SQL: &str = include_str!("../sql/get_project.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProjectsRepository;

impl PgProjectsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: NewProject,
    ) -> Result<ProjectUuid, sqlx::Error> {
        let NewProject {
            uuid,
            dealer,
            details,
        } = project;

        query_scalar::<Postgres, Uuid>(CREATE_PROJECT_SQL)
            .bind(uuid.into_uuid())
            .bind(dealer.uuid.into_uuid())
            .bind(dealer.login_nr)
            .bind(dealer.store_name)
            .bind(details.project_type)
            .bind(details.name)
            .bind(details.customer)
            .bind(details.location)
            .bind(details.start.map(SqlxDate::from))
            .bind(details.end.map(SqlxDate::from))
            .bind(details.comment)
            .bind(details.project_date.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
            .map(ProjectUuid::from_uuid)
    }

    pub(crate) async fn get_project(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        project: ProjectUuid,
    ) -> Result<ProjectRecord, sqlx::Error> {
        query_as::<Postgres, ProjectRecord>(GET_PROJECT_SQL)
            .bind(project.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProjectRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProjectUuid::from_uuid(row.try_get("uuid")?),
            dealer_uuid: DealerUuid::from_uuid(row.try_get("dealer_uuid")?),
            project_type: row.try_get("project_type")?,
            project_name: row.try_get("project_name")?,
            customer: row.try_get("customer")?,
            location: row.try_get("location")?,
            start_date: row
                .try_get::<Option<SqlxDate>, _>("start_date")?
                .map(SqlxDate::to_jiff),
            end_date: row
                .try_get::<Option<SqlxDate>, _>("end_date")?
                .map(SqlxDate::to_jiff),
            comment: row.try_get("comment")?,
            project_date: row.try_get::<SqlxTimestamp, _>("project_date")?.to_jiff(),
        })
    }
}
