//! Rebate Handlers

pub(crate) mod claims;
pub(crate) mod quote;
