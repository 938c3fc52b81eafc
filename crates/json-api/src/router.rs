//! App Router

use salvo::Router;

use crate::{auth, cashback, dealer, rebates, sessions, submissions};

/// Every bearer-authenticated route.
///
/// Dealer data routes also need a live session in the `X-Session-Id` header;
/// session management and back-office routes only need the token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::new()
                .hoop(auth::session::handler)
                .push(Router::with_path("dealer").get(dealer::get::handler))
                .push(
                    Router::with_path("submissions")
                        .get(submissions::index::handler)
                        .post(submissions::create::handler)
                        .push(Router::with_path("{submission}").get(submissions::get::handler)),
                )
                .push(
                    Router::with_path("rebates")
                        .push(Router::with_path("quote").post(rebates::quote::handler))
                        .push(
                            Router::with_path("claims")
                                .get(rebates::claims::index::handler)
                                .post(rebates::claims::create::handler)
                                .push(
                                    Router::with_path("{claim}")
                                        .get(rebates::claims::get::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("cashback/claims")
                        .get(cashback::index::handler)
                        .post(cashback::create::handler)
                        .push(Router::with_path("{claim}").get(cashback::get::handler)),
                ),
        )
        .push(
            Router::with_path("sessions").post(sessions::start).push(
                Router::with_path("{session}")
                    .get(sessions::get)
                    .delete(sessions::end)
                    .push(Router::with_path("renew").post(sessions::renew))
                    .push(Router::with_path("activity").post(sessions::activity)),
            ),
        )
        .push(
            Router::with_path("admin")
                .push(
                    Router::with_path("acting-as")
                        .post(dealer::acting_as::set)
                        .delete(dealer::acting_as::reset),
                )
                .push(
                    Router::with_path("submissions/{submission}/status")
                        .put(submissions::review::handler),
                )
                .push(
                    Router::with_path("rebates/claims/{claim}/status")
                        .put(rebates::claims::review::handler),
                ),
        )
}
