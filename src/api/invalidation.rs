use serde::{Deserialize, Serialize};

/// What a state change dirties, used to classify recompute requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecomputeTopic {
    /// Per-entity metric means feeding the map color values.
    Aggregates,
    /// The per-entity series index and chart axis domains.
    Series,
    /// Pointer-driven nearest-point overlay only; no frame rebuild.
    Cursor,
}

impl RecomputeTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Aggregates => 1 << 0,
            Self::Series => 1 << 1,
            Self::Cursor => 1 << 2,
        }
    }
}

/// Bitmask of recompute topics.
///
/// A metric change dirties aggregates and series; a selection change dirties
/// series only; a pointer move dirties the cursor only. The coordinator
/// consumes the mask in one synchronous pass, so masks never accumulate
/// across events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RecomputeScope {
    bits: u8,
}

impl RecomputeScope {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn from_topic(topic: RecomputeTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: RecomputeTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains(self, topic: RecomputeTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    /// Scope for a metric change.
    #[must_use]
    pub const fn metric_change() -> Self {
        Self::from_topic(RecomputeTopic::Aggregates).with_topic(RecomputeTopic::Series)
    }

    /// Scope for a selection change.
    #[must_use]
    pub const fn selection_change() -> Self {
        Self::from_topic(RecomputeTopic::Series)
    }

    /// Scope for a pointer move.
    #[must_use]
    pub const fn pointer_move() -> Self {
        Self::from_topic(RecomputeTopic::Cursor)
    }
}
