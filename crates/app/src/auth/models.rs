//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{auth::ApiTokenVersion, domain::dealers::records::DealerUuid};

/// What an authenticated caller may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Reads and writes only its own dealer's rows.
    Dealer,

    /// Back-office staff; may review every dealer's submissions and claims.
    Admin,
}

/// The authenticated caller behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub dealer: DealerUuid,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub const fn dealer(dealer: DealerUuid) -> Self {
        Self {
            dealer,
            role: Role::Dealer,
        }
    }

    #[must_use]
    pub const fn admin(dealer: DealerUuid) -> Self {
        Self {
            dealer,
            role: Role::Admin,
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub dealer_uuid: DealerUuid,
    pub version: ApiTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
    pub is_admin: bool,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub dealer_uuid: DealerUuid,
    pub version: ApiTokenVersion,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: Uuid,
    pub dealer_uuid: DealerUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub is_admin: bool,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
