//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use portal_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        cashback::MockCashbackClaimsService,
        dealers::{MockDealersService, records::DealerUuid},
        rebates::MockRebateClaimsService,
        sessions::MockSessionsService,
        submissions::MockSubmissionsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_DEALER_UUID: DealerUuid = DealerUuid::from_uuid(Uuid::nil());

/// Mocks backing a test [`State`]. Any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct TestServices {
    pub dealers: MockDealersService,
    pub auth: MockAuthService,
    pub submissions: MockSubmissionsService,
    pub rebates: MockRebateClaimsService,
    pub cashback: MockCashbackClaimsService,
    pub sessions: MockSessionsService,
}

pub(crate) fn state_with(services: TestServices) -> Arc<State> {
    State::shared(AppContext {
        dealers: Arc::new(services.dealers),
        auth: Arc::new(services.auth),
        submissions: Arc::new(services.submissions),
        rebates: Arc::new(services.rebates),
        cashback: Arc::new(services.cashback),
        sessions: Arc::new(services.sessions),
    })
}

#[salvo::handler]
async fn as_dealer(req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    depot.insert_principal(Principal::dealer(TEST_DEALER_UUID));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn as_admin(req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    depot.insert_principal(Principal::admin(TEST_DEALER_UUID));
    ctrl.call_next(req, depot, res).await;
}

/// Serve `route` for the test dealer, skipping token lookup.
pub(crate) fn dealer_service(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(services)))
            .hoop(as_dealer)
            .push(route),
    )
}

/// Serve `route` for an administrator.
pub(crate) fn admin_service(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(services)))
            .hoop(as_admin)
            .push(route),
    )
}
