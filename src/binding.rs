// 3.0 binding.rs: registry entries for pooled assets. each bound asset carries
// its reserve and the share band its slice of portfolio value must stay inside.

use crate::math::WAD;
use crate::types::{Amount, Share, Timestamp};
use serde::{Deserialize, Serialize};

// 3.1: allowed range for an asset's share of total value. fixed at bind time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareBand {
    min: Share,
    max: Share,
}

impl ShareBand {
    #[must_use]
    pub fn new(min: Share, max: Share) -> Option<Self> {
        if min <= max && max.value() <= WAD {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// The full [0, 1] range. Used by pools that skip composition limits.
    pub fn unconstrained() -> Self {
        Self {
            min: Share::zero(),
            max: Share::new(WAD),
        }
    }

    pub fn min(&self) -> Share {
        self.min
    }

    pub fn max(&self) -> Share {
        self.max
    }

    pub fn contains(&self, share: Share) -> bool {
        self.min <= share && share <= self.max
    }
}

// 3.2: one registry entry per bound asset. the reserve only moves through
// bind, unbind, and trade commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetBinding {
    pub reserve: Amount,
    pub band: ShareBand,
    pub bound_at: Timestamp,
}

impl AssetBinding {
    pub fn new(reserve: Amount, band: ShareBand, bound_at: Timestamp) -> Self {
        Self {
            reserve,
            band,
            bound_at,
        }
    }
}
