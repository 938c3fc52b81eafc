//! Submissions
//!
//! Orders, sell-out reports, project requests and support claims, written as
//! one parent submission per fulfilling distributor.

pub mod data;
pub mod errors;
pub mod grouping;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod store;
pub mod writer;

pub use errors::SubmissionsServiceError;
pub use grouping::{DEFAULT_DISTRIBUTOR, DistributorGroup, partition_by_distributor};
pub use service::*;
pub use store::PgSubmissionsStore;
pub use writer::{SubmissionsStore, submit_grouped_items};
