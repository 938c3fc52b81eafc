//! Dealer Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Dealer UUID
pub type DealerUuid = TypedUuid<DealerRecord>;

/// Dealer Record
#[derive(Debug, Clone)]
pub struct DealerRecord {
    pub uuid: DealerUuid,
    pub login_nr: Option<String>,
    pub store_name: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl DealerRecord {
    /// The identity stamped onto everything this dealer submits.
    #[must_use]
    pub fn identity(&self) -> DealerIdentity {
        DealerIdentity {
            uuid: self.uuid,
            login_nr: self.login_nr.clone(),
            store_name: self.store_name.clone(),
        }
    }
}

/// The owner of a submission, passed explicitly to every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerIdentity {
    pub uuid: DealerUuid,
    pub login_nr: Option<String>,
    pub store_name: Option<String>,
}
