//! Submission Items Repository

use jiff_sqlx::Date as SqlxDate;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query_as,
};
use uuid::Uuid;

use crate::domain::submissions::{
    data::NewSubmissionItem,
    records::{ProjectUuid, SubmissionItemRecord, SubmissionItemUuid, SubmissionUuid},
};

const LIST_SUBMISSION_ITEMS_SQL: &str = include_str!("../sql/list_submission_items.sql");

const INSERT_ITEMS_PREFIX: &str = "INSERT INTO submission_items (uuid, submission_uuid, \
     product_id, quantity, price, item_date, ean, product_name, serial_number, project_uuid) ";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubmissionItemsRepository;

impl PgSubmissionItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert every line in a single statement.
    pub(crate) async fn create_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: Vec<NewSubmissionItem>,
    ) -> Result<Vec<SubmissionItemUuid>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<SubmissionItemUuid> =
            items.iter().map(|_| SubmissionItemUuid::new()).collect();

        let mut builder = QueryBuilder::<Postgres>::new(INSERT_ITEMS_PREFIX);

        builder.push_values(uuids.iter().zip(items), |mut row, (uuid, item)| {
            row.push_bind(uuid.into_uuid())
                .push_bind(item.submission.into_uuid())
                .push_bind(item.product_id)
                .push_bind(item.quantity)
                .push_bind(item.price)
                .push_bind(SqlxDate::from(item.item_date))
                .push_bind(item.ean)
                .push_bind(item.product_name)
                .push_bind(item.serial_number)
                .push_bind(item.project.map(ProjectUuid::into_uuid));
        });

        builder.build().execute(&mut **tx).await?;

        Ok(uuids)
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        submission: SubmissionUuid,
    ) -> Result<Vec<SubmissionItemRecord>, sqlx::Error> {
        query_as::<Postgres, SubmissionItemRecord>(LIST_SUBMISSION_ITEMS_SQL)
            .bind(submission.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SubmissionItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SubmissionItemUuid::from_uuid(row.try_get("uuid")?),
            submission_uuid: SubmissionUuid::from_uuid(row.try_get("submission_uuid")?),
            product_id: row.try_get("product_id")?,
            quantity: row.try_get("quantity")?,
            price: row.try_get("price")?,
            item_date: row.try_get::<SqlxDate, _>("item_date")?.to_jiff(),
            ean: row.try_get("ean")?,
            product_name: row.try_get("product_name")?,
            serial_number: row.try_get("serial_number")?,
            project_uuid: row
                .try_get::<Option<Uuid>, _>("project_uuid")?
                .map(ProjectUuid::from_uuid),
        })
    }
}
