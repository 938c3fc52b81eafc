//! Rebate tier calculation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    numbers::{LooseValue, safe_number},
    rebates::classifier::{ProductRole, classify_role},
};

/// One line of a rebate cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RebateLine {
    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default)]
    pub ean: Option<String>,

    /// Free-text category; drives role classification.
    #[serde(default)]
    pub category: Option<String>,

    /// Catalog group, kept for the claim snapshot only.
    #[serde(default)]
    pub group: Option<String>,

    /// Tier 1 amount, read from the TV line.
    #[serde(default)]
    pub base_amount: LooseValue,

    /// Tier 2 amount, read from the TV line.
    #[serde(default)]
    pub double_amount: LooseValue,

    /// Tier 3 amount, read from the TV line.
    #[serde(default)]
    pub triple_amount: LooseValue,
}

impl RebateLine {
    #[must_use]
    pub fn role(&self) -> Option<ProductRole> {
        classify_role(self.category.as_deref())
    }

    fn amount_for(&self, tier: RebateTier) -> f64 {
        safe_number(match tier {
            RebateTier::Single => &self.base_amount,
            RebateTier::Double => &self.double_amount,
            RebateTier::Triple => &self.triple_amount,
        })
    }
}

/// Discount level unlocked by bundle composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RebateTier {
    /// TV alone.
    Single,

    /// TV and soundbar.
    Double,

    /// TV, soundbar and subwoofer.
    Triple,
}

impl RebateTier {
    #[must_use]
    pub const fn level(self) -> i16 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }

    #[must_use]
    pub const fn from_level(level: i16) -> Option<Self> {
        match level {
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RebateQuote {
    pub tier: RebateTier,
    pub amount: f64,
}

/// The cart does not form a valid rebate bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidCompositionError {
    #[error("exactly one TV is required, found {0}")]
    TvCount(usize),

    #[error("at most one soundbar is allowed, found {0}")]
    TooManySoundbars(usize),

    #[error("at most one subwoofer is allowed, found {0}")]
    TooManySubwoofers(usize),
}

/// Validate bundle composition and resolve the tier and amount.
///
/// A missing or non-numeric amount on the TV line yields `0.0`, not an error.
pub fn calculate_rebate(lines: &[RebateLine]) -> Result<RebateQuote, InvalidCompositionError> {
    // A valid bundle has exactly one TV; more are only counted for the error.
    let mut tvs: SmallVec<[&RebateLine; 1]> = SmallVec::new();
    let mut soundbars = 0_usize;
    let mut subwoofers = 0_usize;

    for line in lines {
        match line.role() {
            Some(ProductRole::Tv) => tvs.push(line),
            Some(ProductRole::Soundbar) => soundbars += 1,
            Some(ProductRole::Subwoofer) => subwoofers += 1,
            None => {}
        }
    }

    let [tv] = tvs.as_slice() else {
        return Err(InvalidCompositionError::TvCount(tvs.len()));
    };

    if soundbars > 1 {
        return Err(InvalidCompositionError::TooManySoundbars(soundbars));
    }

    if subwoofers > 1 {
        return Err(InvalidCompositionError::TooManySubwoofers(subwoofers));
    }

    let tier = match (soundbars, subwoofers) {
        (1, 1) => RebateTier::Triple,
        (1, _) => RebateTier::Double,
        _ => RebateTier::Single,
    };

    let amount = tv.amount_for(tier);

    debug!(tier = tier.level(), amount, "calculated rebate");

    Ok(RebateQuote { tier, amount })
}
