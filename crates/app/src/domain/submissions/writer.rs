//! Grouped multi-distributor submission writer.
//!
//! A cart fans out into one parent submission per distributor, each followed by
//! a bulk insert of its lines. Writes are sequential and each commits on its
//! own: when a group fails, the call stops and earlier groups stay written.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tracing::{error, info, instrument};

use crate::domain::{
    dealers::records::{DealerIdentity, DealerUuid},
    numbers::{product_ref_or_null, safe_number, safe_quantity},
    submissions::{
        data::{
            CartLine, GroupedSubmission, NewProject, NewSubmission, NewSubmissionItem,
            SubmissionKind, SubmittedGroup,
        },
        errors::SubmissionsServiceError,
        grouping::partition_by_distributor,
        records::{ProjectUuid, SubmissionItemUuid, SubmissionUuid},
    },
};

/// Persistence seam for the grouped writer.
#[automock]
#[async_trait]
pub trait SubmissionsStore: Send + Sync {
    async fn create_project(&self, project: NewProject) -> Result<ProjectUuid, sqlx::Error>;

    async fn create_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionUuid, sqlx::Error>;

    /// Insert all lines of one submission; all-or-nothing per call.
    async fn create_items(
        &self,
        dealer: DealerUuid,
        items: Vec<NewSubmissionItem>,
    ) -> Result<Vec<SubmissionItemUuid>, sqlx::Error>;
}

/// Write a cart as one submission per distributor group.
///
/// Project submissions first create a single project and link it to every
/// group. Returns one entry per group, in group order.
#[instrument(skip_all, fields(submission_type = %submission.kind.submission_type()))]
pub async fn submit_grouped_items<S>(
    store: &S,
    dealer: Option<DealerIdentity>,
    submission: GroupedSubmission,
    today: Date,
) -> Result<Vec<SubmittedGroup>, SubmissionsServiceError>
where
    S: SubmissionsStore + ?Sized,
{
    let dealer = dealer.ok_or(SubmissionsServiceError::MissingDealer)?;

    if submission.items.is_empty() {
        return Err(SubmissionsServiceError::EmptyCart);
    }

    let GroupedSubmission { kind, items } = submission;
    let submission_type = kind.submission_type();
    let metadata = kind.metadata();

    let project = match kind {
        SubmissionKind::Project(details) => {
            let uuid = store
                .create_project(NewProject {
                    uuid: ProjectUuid::new(),
                    dealer: dealer.clone(),
                    details,
                })
                .await
                .map_err(|source| {
                    error!(error = %source, "project creation failed");

                    SubmissionsServiceError::ProjectCreation(source)
                })?;

            Some(uuid)
        }
        SubmissionKind::Order(_) | SubmissionKind::Sale(_) | SubmissionKind::Support(_) => None,
    };

    let groups = partition_by_distributor(items);
    let mut submitted = Vec::with_capacity(groups.len());

    for group in groups {
        let submission_uuid = store
            .create_submission(NewSubmission {
                uuid: SubmissionUuid::new(),
                dealer: dealer.uuid,
                submission_type,
                distributor: group.distributor.clone(),
                project,
                metadata: metadata.clone(),
            })
            .await
            .map_err(|source| {
                error!(distributor = %group.distributor, error = %source, "submission write failed");

                SubmissionsServiceError::SubmissionWrite {
                    distributor: group.distributor.clone(),
                    source,
                }
            })?;

        let items = group
            .lines
            .iter()
            .map(|line| item_for_line(line, submission_uuid, project, today))
            .collect();

        store
            .create_items(dealer.uuid, items)
            .await
            .map_err(|source| {
                error!(distributor = %group.distributor, error = %source, "item write failed");

                SubmissionsServiceError::ItemWrite {
                    distributor: group.distributor.clone(),
                    source,
                }
            })?;

        info!(
            dealer_uuid = %dealer.uuid,
            distributor = %group.distributor,
            %submission_uuid,
            lines = group.lines.len(),
            "wrote submission group"
        );

        submitted.push(SubmittedGroup {
            distributor: group.distributor,
            submission_uuid,
            project_uuid: project,
        });
    }

    Ok(submitted)
}

fn item_for_line(
    line: &CartLine,
    submission: SubmissionUuid,
    project: Option<ProjectUuid>,
    today: Date,
) -> NewSubmissionItem {
    let price = if line.price.is_missing() {
        &line.support_amount
    } else {
        &line.price
    };

    NewSubmissionItem {
        submission,
        product_id: product_ref_or_null(&line.product_id),
        quantity: safe_quantity(&line.quantity),
        price: safe_number(price),
        item_date: line.date.unwrap_or(today),
        ean: line.ean.clone(),
        product_name: line.product_name.clone(),
        serial_number: line
            .serial_number
            .as_deref()
            .map(str::trim)
            .filter(|serial| !serial.is_empty())
            .map(str::to_string),
        project,
    }
}
