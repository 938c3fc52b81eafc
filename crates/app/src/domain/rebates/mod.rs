//! Instant rebates
//!
//! Bundle classification, tier calculation and the claims dealers file against
//! a qualifying TV purchase.

pub mod classifier;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod tiers;

pub use classifier::{ProductRole, classify_role};
pub use errors::RebateClaimsServiceError;
pub use service::*;
pub use tiers::{InvalidCompositionError, RebateLine, RebateQuote, RebateTier, calculate_rebate};
