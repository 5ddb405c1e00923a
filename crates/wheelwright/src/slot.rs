use derive_more::{Deref, Display, Into};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

pub const SLOT_COUNT: usize = 10;
/// Angle between two neighbouring slots.
pub const SLOT_ARC: f64 = 2.0 * PI / SLOT_COUNT as f64;

/// Position of a spoke on the wheel, always in `0..SLOT_COUNT`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Display,
    Deref,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct SlotIndex(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("slot {0} is out of range (expected 0..{max})", max = SLOT_COUNT)]
pub struct SlotIndexError(pub usize);

impl SlotIndex {
    pub const FIRST: Self = Self(0);

    pub fn new(index: usize) -> Result<Self, SlotIndexError> {
        (index < SLOT_COUNT)
            .then_some(Self(index))
            .ok_or(SlotIndexError(index))
    }

    pub fn wrapping(index: usize) -> Self {
        Self(index % SLOT_COUNT)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn next(self) -> Self {
        Self((self.0 + 1) % SLOT_COUNT)
    }

    pub fn prev(self) -> Self {
        Self((self.0 + SLOT_COUNT - 1) % SLOT_COUNT)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLOT_COUNT).map(Self)
    }
}

impl TryFrom<usize> for SlotIndex {
    type Error = SlotIndexError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}
