//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use portal_app::{auth::Principal, domain::dealers::records::DealerUuid};

/// Dealer an administrator has chosen to act as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActingDealer(DealerUuid);

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the caller resolved by the auth middleware.
    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated caller, or 401 when the auth middleware did not run.
    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    /// Record the dealer an administrator acts as for this request.
    fn insert_acting_dealer(&mut self, dealer: DealerUuid);

    fn acting_dealer(&self) -> Option<DealerUuid>;

    /// The dealer whose data the request works on: the acting dealer for
    /// administrators who chose one, the caller's own dealer otherwise.
    fn dealer_uuid_or_401(&self) -> Result<DealerUuid, StatusError> {
        let principal = self.principal_or_401()?;

        Ok(self
            .acting_dealer()
            .filter(|_| principal.is_admin())
            .unwrap_or(principal.dealer))
    }

    /// The authenticated caller when it holds the admin role, 403 otherwise.
    fn admin_or_403(&self) -> Result<Principal, StatusError> {
        let principal = self.principal_or_401()?;

        if principal.is_admin() {
            Ok(principal)
        } else {
            Err(StatusError::forbidden().brief("Administrator role required"))
        }
    }
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn insert_acting_dealer(&mut self, dealer: DealerUuid) {
        self.inject(ActingDealer(dealer));
    }

    fn acting_dealer(&self) -> Option<DealerUuid> {
        self.obtain::<ActingDealer>()
            .ok()
            .map(|ActingDealer(dealer)| *dealer)
    }
}
