//! Cashback Claim Data

use jiff::civil::Date;
use serde_json::{Value, json};

use crate::domain::{cashback::records::CashbackType, numbers::LooseValue};

/// A dealer's cashback claim as filed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCashbackClaim {
    pub cashback_type: CashbackType,

    /// Claimed amount; must coerce to a positive number.
    pub amount: LooseValue,

    /// Serial number of the claimed device.
    pub serial_number: String,

    /// Soundbar serial, kept for double claims only.
    pub soundbar_serial_number: Option<String>,

    /// Soundbar EAN, kept for double claims only.
    pub soundbar_ean: Option<String>,

    /// Storage path of the uploaded proof of purchase.
    pub document_path: Option<String>,
}

impl NewCashbackClaim {
    /// Soundbar serial and EAN, both `None` unless this is a double claim.
    #[must_use]
    pub fn soundbar(&self) -> (Option<String>, Option<String>) {
        match self.cashback_type {
            CashbackType::Double => (
                non_blank(self.soundbar_serial_number.as_deref()),
                non_blank(self.soundbar_ean.as_deref()),
            ),
            CashbackType::Single => (None, None),
        }
    }
}

/// Trimmed text, or `None` when nothing is left.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Metadata of the parent submission: filing day and its ISO week.
#[must_use]
pub fn cashback_metadata(day: Date) -> Value {
    json!({
        "date": day.to_string(),
        "calendar_week": day.iso_week_date().week(),
    })
}
