//! Submissions service.

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        dealers::{DealersService, PgDealersService, records::DealerUuid},
        review::ReviewStatus,
        submissions::{
            data::{GroupedSubmission, SubmittedGroup},
            errors::SubmissionsServiceError,
            records::{SubmissionRecord, SubmissionType, SubmissionUuid, SubmissionWithItems},
            repositories::{
                PgProjectsRepository, PgSubmissionItemsRepository, PgSubmissionsRepository,
            },
            store::PgSubmissionsStore,
            writer::submit_grouped_items,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgSubmissionsService {
    db: Db,
    dealers: PgDealersService,
    store: PgSubmissionsStore,
    projects: PgProjectsRepository,
    submissions: PgSubmissionsRepository,
    items: PgSubmissionItemsRepository,
}

impl PgSubmissionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            dealers: PgDealersService::new(db.clone()),
            store: PgSubmissionsStore::new(db.clone()),
            projects: PgProjectsRepository::new(),
            submissions: PgSubmissionsRepository::new(),
            items: PgSubmissionItemsRepository::new(),
            db,
        }
    }
}

#[async_trait]
impl SubmissionsService for PgSubmissionsService {
    async fn submit(
        &self,
        dealer: DealerUuid,
        submission: GroupedSubmission,
    ) -> Result<Vec<SubmittedGroup>, SubmissionsServiceError> {
        let identity = self
            .dealers
            .find_dealer(dealer)
            .await?
            .map(|record| record.identity());

        let today = Zoned::now().date();

        submit_grouped_items(&self.store, identity, submission, today).await
    }

    async fn list_submissions(
        &self,
        dealer: DealerUuid,
        submission_type: Option<SubmissionType>,
    ) -> Result<Vec<SubmissionRecord>, SubmissionsServiceError> {
        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let submissions = self
            .submissions
            .list_submissions(&mut tx, dealer, submission_type)
            .await?;

        tx.commit().await?;

        Ok(submissions)
    }

    async fn get_submission(
        &self,
        dealer: DealerUuid,
        submission: SubmissionUuid,
    ) -> Result<SubmissionWithItems, SubmissionsServiceError> {
        let mut tx = self.db.begin_dealer_transaction(dealer).await?;

        let record = self.submissions.get_submission(&mut tx, submission).await?;
        let items = self.items.list_items(&mut tx, submission).await?;

        let project = match record.project_uuid {
            Some(project) => Some(self.projects.get_project(&mut tx, project).await?),
            None => None,
        };

        tx.commit().await?;

        Ok(SubmissionWithItems {
            submission: record,
            items,
            project,
        })
    }

    async fn update_status(
        &self,
        submission: SubmissionUuid,
        status: ReviewStatus,
    ) -> Result<SubmissionRecord, SubmissionsServiceError> {
        let mut tx = self.db.begin_admin_transaction().await?;

        let record = self
            .submissions
            .update_status(&mut tx, submission, status)
            .await?;

        tx.commit().await?;

        info!(submission_uuid = %submission, %status, "reviewed submission");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait SubmissionsService: Send + Sync {
    /// Write a cart for the dealer, one submission per distributor.
    async fn submit(
        &self,
        dealer: DealerUuid,
        submission: GroupedSubmission,
    ) -> Result<Vec<SubmittedGroup>, SubmissionsServiceError>;

    /// Newest first, optionally narrowed to one submission type.
    async fn list_submissions(
        &self,
        dealer: DealerUuid,
        submission_type: Option<SubmissionType>,
    ) -> Result<Vec<SubmissionRecord>, SubmissionsServiceError>;

    async fn get_submission(
        &self,
        dealer: DealerUuid,
        submission: SubmissionUuid,
    ) -> Result<SubmissionWithItems, SubmissionsServiceError>;

    /// Confirm or reject a submission. Administrative.
    async fn update_status(
        &self,
        submission: SubmissionUuid,
        status: ReviewStatus,
    ) -> Result<SubmissionRecord, SubmissionsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        domain::{
            numbers::LooseValue,
            submissions::data::{CartLine, OrderDetails, ProjectDetails, SalePeriod, SubmissionKind},
        },
        test::TestContext,
    };

    use super::*;

    fn line(distributor: Option<&str>, product_id: LooseValue, quantity: i64) -> CartLine {
        CartLine {
            product_id,
            quantity: quantity.into(),
            price: "499.00".into(),
            distributor: distributor.map(str::to_string),
            ean: Some("7610000000001".to_string()),
            product_name: Some("Bravia 8".to_string()),
            ..CartLine::default()
        }
    }

    fn order(items: Vec<CartLine>) -> GroupedSubmission {
        GroupedSubmission {
            kind: SubmissionKind::Order(OrderDetails {
                comment: Some("Lieferung bis Freitag".to_string()),
            }),
            items,
        }
    }

    #[tokio::test]
    async fn submit_writes_one_submission_per_distributor() -> TestResult {
        let ctx = TestContext::new().await;

        let groups = ctx
            .submissions
            .submit(
                ctx.dealer_uuid,
                order(vec![
                    line(Some("A"), "1".into(), 2),
                    line(Some("B"), "cost_1699999999".into(), 1),
                    line(Some("A"), 42_i64.into(), 3),
                ]),
            )
            .await?;

        assert_eq!(groups.len(), 2);

        let listed = ctx
            .submissions
            .list_submissions(ctx.dealer_uuid, None)
            .await?;

        assert_eq!(listed.len(), 2);

        for group in &groups {
            let stored = ctx
                .submissions
                .get_submission(ctx.dealer_uuid, group.submission_uuid)
                .await?;

            assert_eq!(stored.submission.distributor, group.distributor);
            assert_eq!(stored.submission.status, ReviewStatus::Pending);
            assert_eq!(stored.submission.submission_type, SubmissionType::Order);

            let expected: Vec<Option<i64>> = if group.distributor == "A" {
                vec![Some(1), Some(42)]
            } else {
                vec![None]
            };
            let mut product_ids: Vec<Option<i64>> =
                stored.items.iter().map(|item| item.product_id).collect();
            product_ids.sort_unstable();

            assert_eq!(product_ids, expected);
        }

        Ok(())
    }

    #[tokio::test]
    async fn unknown_dealer_is_missing_dealer() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .submissions
            .submit(DealerUuid::new(), order(vec![line(None, 1_i64.into(), 1)]))
            .await;

        assert!(matches!(result, Err(SubmissionsServiceError::MissingDealer)));

        Ok(())
    }

    #[tokio::test]
    async fn project_submission_links_project() -> TestResult {
        let ctx = TestContext::new().await;

        let project = GroupedSubmission {
            kind: SubmissionKind::Project(ProjectDetails {
                project_type: Some("Hotel".to_string()),
                name: Some("Bellevue".to_string()),
                customer: Some("Bellevue AG".to_string()),
                start: Some(date(2026, 11, 1)),
                end: Some(date(2026, 12, 15)),
                ..ProjectDetails::default()
            }),
            items: vec![line(Some("A"), 1_i64.into(), 40), line(None, 2_i64.into(), 40)],
        };

        let groups = ctx.submissions.submit(ctx.dealer_uuid, project).await?;
        let project_uuid = groups.first().and_then(|g| g.project_uuid);

        assert!(project_uuid.is_some());
        assert!(groups.iter().all(|g| g.project_uuid == project_uuid));

        let first = groups.first().map(|g| g.submission_uuid).expect("group");
        let stored = ctx.submissions.get_submission(ctx.dealer_uuid, first).await?;
        let linked = stored.project.expect("linked project");

        assert_eq!(Some(linked.uuid), project_uuid);
        assert_eq!(linked.project_name.as_deref(), Some("Bellevue"));
        assert_eq!(linked.end_date, Some(date(2026, 12, 15)));
        assert!(stored.items.iter().all(|item| item.project_uuid == project_uuid));

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_type() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.submissions
            .submit(ctx.dealer_uuid, order(vec![line(None, 1_i64.into(), 1)]))
            .await?;
        ctx.submissions
            .submit(
                ctx.dealer_uuid,
                GroupedSubmission {
                    kind: SubmissionKind::Sale(SalePeriod {
                        calendar_week: Some(42),
                        inhouse_share: Some(20.0),
                    }),
                    items: vec![line(None, 1_i64.into(), 5)],
                },
            )
            .await?;

        let sales = ctx
            .submissions
            .list_submissions(ctx.dealer_uuid, Some(SubmissionType::Sale))
            .await?;

        assert_eq!(sales.len(), 1);
        assert_eq!(
            sales.first().map(|s| s.metadata.clone()),
            Some(serde_json::json!({ "calendar_week": 42, "inhouse_share": 20.0 }))
        );

        Ok(())
    }

    #[tokio::test]
    async fn submissions_are_private_to_their_dealer() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_dealer("Other Dealer").await;

        let groups = ctx
            .submissions
            .submit(ctx.dealer_uuid, order(vec![line(None, 1_i64.into(), 1)]))
            .await?;
        let submission = groups.first().map(|g| g.submission_uuid).expect("group");

        assert!(ctx.submissions.list_submissions(other, None).await?.is_empty());

        let result = ctx.submissions.get_submission(other, submission).await;

        assert!(matches!(result, Err(SubmissionsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn update_status_reviews_submission() -> TestResult {
        let ctx = TestContext::new().await;

        let groups = ctx
            .submissions
            .submit(ctx.dealer_uuid, order(vec![line(None, 1_i64.into(), 1)]))
            .await?;
        let submission = groups.first().map(|g| g.submission_uuid).expect("group");

        let updated = ctx
            .submissions
            .update_status(submission, ReviewStatus::Rejected)
            .await?;

        assert_eq!(updated.status, ReviewStatus::Rejected);

        Ok(())
    }
}
