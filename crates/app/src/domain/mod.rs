//! Portal Domain Concerns

pub mod cashback;
pub mod dealers;
pub mod numbers;
pub mod rebates;
pub mod review;
pub mod sessions;
pub mod submissions;
