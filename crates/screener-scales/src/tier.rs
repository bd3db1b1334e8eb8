//! Favorability tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three favorability bands a metric value can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// At or better than the excellent threshold (green).
    Favorable,
    /// Between the excellent and good thresholds (yellow).
    Neutral,
    /// Worse than the good threshold (red).
    Unfavorable,
}

impl Tier {
    /// All tiers, most favorable first.
    pub const ALL: [Self; 3] = [Self::Favorable, Self::Neutral, Self::Unfavorable];

    /// Zero-based position, 0 being the most favorable.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Favorable => 0,
            Self::Neutral => 1,
            Self::Unfavorable => 2,
        }
    }

    /// Tier for a boundary index, saturating at [`Tier::Unfavorable`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Favorable,
            1 => Self::Neutral,
            _ => Self::Unfavorable,
        }
    }

    /// Label of the threshold that closes this tier.
    #[must_use]
    pub const fn threshold_label(&self) -> &'static str {
        match self {
            Self::Favorable => "Excellent",
            Self::Neutral => "Good",
            Self::Unfavorable => "Poor",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Favorable => "favorable",
            Self::Neutral => "neutral",
            Self::Unfavorable => "unfavorable",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_index(tier.index()), tier);
        }
        assert_eq!(Tier::from_index(7), Tier::Unfavorable);
    }

    #[test]
    fn test_ordering_follows_favorability() {
        assert!(Tier::Favorable < Tier::Neutral);
        assert!(Tier::Neutral < Tier::Unfavorable);
    }
}
