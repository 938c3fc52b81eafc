//! Dealer Data

use crate::domain::dealers::records::DealerUuid;

/// New Dealer Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewDealer {
    /// UUID to assign to the dealer row.
    pub uuid: DealerUuid,

    /// Customer number the dealer logs in with.
    pub login_nr: Option<String>,

    /// Store display name.
    pub store_name: Option<String>,

    /// Contact address for notifications.
    pub email: Option<String>,
}
