//! Rebate Claim Data

use serde::{Deserialize, Serialize};

use crate::domain::rebates::tiers::RebateLine;

/// A dealer's rebate claim as filed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRebateClaim {
    /// Cart lines making up the bundle.
    pub items: Vec<RebateLine>,

    /// Storage path of the uploaded invoice, stored verbatim.
    pub invoice_path: String,

    /// Optional note; defaults to the tier label.
    pub comment: Option<String>,
}

/// Product snapshot persisted alongside a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedProduct {
    pub product_name: Option<String>,
    pub ean: Option<String>,
    pub category: Option<String>,
    pub qty: i64,
}

impl From<&RebateLine> for ClaimedProduct {
    fn from(line: &RebateLine) -> Self {
        Self {
            product_name: line.product_name.clone(),
            ean: line.ean.clone(),
            category: line
                .category
                .clone()
                .filter(|category| !category.is_empty())
                .or_else(|| line.group.clone()),
            qty: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_falls_back_to_group() {
        let product = ClaimedProduct::from(&RebateLine {
            category: Some(String::new()),
            group: Some("Soundbar".to_string()),
            ..RebateLine::default()
        });

        assert_eq!(product.category.as_deref(), Some("Soundbar"));
    }

    #[test]
    fn category_wins_over_group() {
        let product = ClaimedProduct::from(&RebateLine {
            category: Some("TV".to_string()),
            group: Some("Soundbar".to_string()),
            ..RebateLine::default()
        });

        assert_eq!(product.category.as_deref(), Some("TV"));
        assert_eq!(product.qty, 1);
    }
}
