//! Dealer Handlers

pub(crate) mod acting_as;
pub(crate) mod get;
