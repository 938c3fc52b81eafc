//! Cashback
//!
//! Manufacturer cashback claims. Each claim is filed under its own parent
//! submission, which carries the review status.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CashbackClaimsServiceError;
pub use records::{CashbackType, UnknownCashbackType};
pub use service::*;
