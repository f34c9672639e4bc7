// 1.0: all the primitives live here. nothing in the engine works without these types.
// IDs, amounts, prices, shares, timestamps. each is a newtype so the compiler catches type mixups.
// fractional quantities are wad fixed point: integers at scale 1e18.

use crate::math::decimal_from_wad;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

// 1.1: balance in an asset's own native unit. no implied scale, checked arithmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u128);

impl Amount {
    pub fn new(units: u128) -> Self {
        Self(units)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn checked_add(&self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Self)
    }

    #[must_use]
    pub fn checked_sub(&self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: wad price of one native unit in the common pricing unit. must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(u128);

impl Price {
    #[must_use]
    pub fn new(wad: u128) -> Option<Self> {
        if wad > 0 {
            Some(Self(wad))
        } else {
            None
        }
    }

    pub fn new_unchecked(wad: u128) -> Self {
        debug_assert!(wad > 0);
        Self(wad)
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match decimal_from_wad(self.0) {
            Some(d) => write!(f, "{}", d.normalize()),
            None => write!(f, "{}e-18", self.0),
        }
    }
}

// 1.3: wad fraction of total portfolio value. 0 <= share <= 1e18 when computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Share(u128);

impl Share {
    pub fn new(wad: u128) -> Self {
        Self(wad)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match decimal_from_wad(self.0) {
            Some(d) => write!(f, "{}", d.normalize()),
            None => write!(f, "{}e-18", self.0),
        }
    }
}

// 1.4: wad-priced quantity in the common unit: reserve * price / 1e18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Value(u128);

impl Value {
    pub fn new(wad: u128) -> Self {
        Self(wad)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match decimal_from_wad(self.0) {
            Some(d) => write!(f, "{}", d.normalize()),
            None => write!(f, "{}e-18", self.0),
        }
    }
}

// 1.5: trade direction from the trader's point of view.
// SellBase = trader supplies base, receives quote. BuyBase = trader receives base, pays quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    SellBase,
    BuyBase,
}

// 1.6: millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}
