//! Cashback request bodies.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use portal_app::domain::{
    cashback::{CashbackType, data::NewCashbackClaim},
    numbers::LooseValue,
};

use crate::extensions::*;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCashbackClaimRequest {
    /// `single` or `double`
    #[serde(default)]
    pub cashback_type: Option<String>,

    /// Claimed amount; numbers and decorated strings such as `"150.00 CHF"`
    #[serde(default)]
    pub amount: Value,

    /// Serial number of the claimed device
    #[serde(default)]
    pub serial_number: Option<String>,

    /// Soundbar serial, double claims only
    #[serde(default)]
    pub soundbar_serial_number: Option<String>,

    /// Soundbar EAN, double claims only
    #[serde(default)]
    pub soundbar_ean: Option<String>,

    /// Storage path of the uploaded proof of purchase
    #[serde(default)]
    pub document_path: Option<String>,
}

impl CreateCashbackClaimRequest {
    pub(crate) fn into_claim(self) -> Result<NewCashbackClaim, StatusError> {
        let cashback_type = self
            .cashback_type
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| StatusError::bad_request().brief("cashback_type is required"))?
            .trim()
            .parse::<CashbackType>()
            .or_400("cashback_type must be single or double")?;

        let amount = LooseValue::from(self.amount);

        if amount.is_missing() {
            return Err(StatusError::bad_request().brief("amount is required"));
        }

        let serial_number = self
            .serial_number
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| StatusError::bad_request().brief("serial_number is required"))?;

        Ok(NewCashbackClaim {
            cashback_type,
            amount,
            serial_number,
            soundbar_serial_number: self.soundbar_serial_number,
            soundbar_ean: self.soundbar_ean,
            document_path: self.document_path,
        })
    }
}
