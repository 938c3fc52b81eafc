//! Authentication

pub(crate) mod middleware;
pub(crate) mod session;
