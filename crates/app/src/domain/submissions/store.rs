//! PostgreSQL submissions store.

use async_trait::async_trait;

use crate::{
    database::Db,
    domain::{
        dealers::records::DealerUuid,
        submissions::{
            data::{NewProject, NewSubmission, NewSubmissionItem},
            records::{ProjectUuid, SubmissionItemUuid, SubmissionUuid},
            repositories::{
                PgProjectsRepository, PgSubmissionItemsRepository, PgSubmissionsRepository,
            },
            writer::SubmissionsStore,
        },
    },
};

/// Each write runs in, and commits, its own dealer-scoped transaction.
#[derive(Debug, Clone)]
pub struct PgSubmissionsStore {
    db: Db,
    projects: PgProjectsRepository,
    submissions: PgSubmissionsRepository,
    items: PgSubmissionItemsRepository,
}

impl PgSubmissionsStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            projects: PgProjectsRepository::new(),
            submissions: PgSubmissionsRepository::new(),
            items: PgSubmissionItemsRepository::new(),
        }
    }
}

#[async_trait]
impl SubmissionsStore for PgSubmissionsStore {
    async fn create_project(&self, project: NewProject) -> Result<ProjectUuid, sqlx::Error> {
        let mut tx = self.db.begin_dealer_transaction(project.dealer.uuid).await?;

        let uuid = self.projects.create_project(&mut tx, project).await?;

        tx.commit().await?;

        Ok(uuid)
    }

    async fn create_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionUuid, sqlx::Error> {
        let mut tx = self.db.begin_dealer_transaction(submission.dealer).await?;

        let uuid = self.submissions.create_submission(&mut tx, submission).await?;

        tx.commit().await?;

        Ok(uuid)
    }

    async fn create_items(
        &self,
        dealer: DealerUuid,
        items: Vec<NewSubmissionItem>,
    ) -> Result<Vec<SubmissionItemUuid>, sqlx::Error> {
        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let uuids = self.items.create_items(&mut tx, items).await?;

        tx.commit().await?;

        Ok(uuids)
    }
}
