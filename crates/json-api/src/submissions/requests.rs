//! Submission request bodies.
//!
//! Numeric cart fields accept any JSON value; the app coerces them.

use jiff::{Timestamp, civil::Date};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use portal_app::domain::submissions::data::{
    CartLine, GroupedSubmission, OrderDetails, ProjectDetails, SalePeriod, SubmissionKind,
    SupportDetails,
};

use crate::extensions::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SubmissionKindParam {
    Order,
    Sale,
    Project,
    Support,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineRequest {
    /// Catalog id; synthetic ids such as `cost_1699999999` are stored as null
    #[serde(default)]
    pub product_id: Value,

    #[serde(default)]
    pub quantity: Value,

    #[serde(default)]
    pub price: Value,

    /// Used when `price` is absent
    #[serde(default)]
    pub support_amount: Value,

    /// Fulfilling distributor code, `ep` when empty
    #[serde(default)]
    pub distributor: Option<String>,

    /// Line date (`YYYY-MM-DD`), today when absent
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub ean: Option<String>,

    #[serde(default)]
    pub product_name: Option<String>,

    /// Device serial number
    #[serde(default)]
    pub serial_number: Option<String>,
}

impl CartLineRequest {
    fn into_cart_line(self) -> Result<CartLine, StatusError> {
        Ok(CartLine {
            product_id: self.product_id.into(),
            quantity: self.quantity.into(),
            price: self.price.into(),
            support_amount: self.support_amount.into(),
            distributor: self.distributor,
            date: parse_date(self.date.as_deref(), "date must be YYYY-MM-DD")?,
            ean: self.ean,
            product_name: self.product_name,
            serial_number: self.serial_number,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProjectRequest {
    #[serde(default)]
    pub project_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub customer: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub start: Option<String>,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub end: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    /// RFC 3339 timestamp, now when absent
    #[serde(default)]
    pub project_date: Option<String>,
}

impl ProjectRequest {
    fn into_details(self) -> Result<ProjectDetails, StatusError> {
        Ok(ProjectDetails {
            project_type: self.project_type,
            name: self.name,
            customer: self.customer,
            location: self.location,
            start: parse_date(self.start.as_deref(), "project start must be YYYY-MM-DD")?,
            end: parse_date(self.end.as_deref(), "project end must be YYYY-MM-DD")?,
            comment: self.comment,
            project_date: self
                .project_date
                .as_deref()
                .map(str::parse::<Timestamp>)
                .transpose()
                .or_400("project_date must be an RFC 3339 timestamp")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateSubmissionRequest {
    /// What is being submitted
    pub kind: SubmissionKindParam,

    /// Order or support comment
    #[serde(default)]
    pub comment: Option<String>,

    /// Sell-out calendar week
    #[serde(default)]
    pub calendar_week: Option<u8>,

    /// Sell-out share made in-house, in percent
    #[serde(default)]
    pub inhouse_share: Option<f64>,

    /// Support claim type
    #[serde(default)]
    pub support_type: Option<String>,

    /// Project header, for project requests
    #[serde(default)]
    pub project: Option<ProjectRequest>,

    /// Cart lines
    #[serde(default)]
    pub items: Vec<CartLineRequest>,
}

impl CreateSubmissionRequest {
    pub(crate) fn into_submission(self) -> Result<GroupedSubmission, StatusError> {
        let kind = match self.kind {
            SubmissionKindParam::Order => SubmissionKind::Order(OrderDetails {
                comment: self.comment,
            }),
            SubmissionKindParam::Sale => SubmissionKind::Sale(SalePeriod {
                calendar_week: self.calendar_week,
                inhouse_share: self.inhouse_share,
            }),
            SubmissionKindParam::Project => SubmissionKind::Project(
                self.project.unwrap_or_default().into_details()?,
            ),
            SubmissionKindParam::Support => SubmissionKind::Support(SupportDetails {
                support_type: self.support_type,
                comment: self.comment,
            }),
        };

        let items = self
            .items
            .into_iter()
            .map(CartLineRequest::into_cart_line)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GroupedSubmission { kind, items })
    }
}

fn parse_date(value: Option<&str>, brief: &str) -> Result<Option<Date>, StatusError> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::parse::<Date>)
        .transpose()
        .or_400(brief)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use portal_app::domain::numbers::LooseValue;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn loose_fields_pass_through_untouched() -> TestResult {
        let request: CreateSubmissionRequest = serde_json::from_value(json!({
            "kind": "order",
            "comment": "rush",
            "items": [
                { "product_id": "cost_1699999999", "quantity": "2", "price": "1'234.56 CHF",
                  "distributor": "B", "date": "2024-03-01" }
            ]
        }))?;

        let submission = request.into_submission()?;
        let [line] = submission.items.as_slice() else {
            return Err("expected one line".into());
        };

        assert_eq!(
            submission.kind,
            SubmissionKind::Order(OrderDetails {
                comment: Some("rush".to_string())
            })
        );
        assert_eq!(line.product_id, LooseValue::from("cost_1699999999"));
        assert_eq!(line.quantity, LooseValue::from("2"));
        assert_eq!(line.date, Some(date(2024, 3, 1)));

        Ok(())
    }

    #[test]
    fn project_without_header_uses_defaults() -> TestResult {
        let request: CreateSubmissionRequest =
            serde_json::from_value(json!({ "kind": "project", "items": [] }))?;

        let submission = request.into_submission()?;

        assert_eq!(
            submission.kind,
            SubmissionKind::Project(ProjectDetails::default())
        );

        Ok(())
    }

    #[test]
    fn malformed_line_date_is_rejected() -> TestResult {
        let request: CreateSubmissionRequest = serde_json::from_value(json!({
            "kind": "sale",
            "items": [{ "date": "01.03.2024" }]
        }))?;

        let error = request.into_submission().err();

        assert_eq!(error.map(|error| error.code.as_u16()), Some(400));

        Ok(())
    }
}
