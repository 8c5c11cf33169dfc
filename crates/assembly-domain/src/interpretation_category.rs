//! Interpretation categories of failure mechanism sections

use crate::category::CategoryKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Interpretation category of a failure mechanism section
///
/// The severity order is given by [`InterpretationCategory::rank`], not by
/// the declaration order below:
///
/// | rank | category | meaning |
/// |------|----------|---------|
/// | 0 | `NotRelevant` | mechanism does not apply to this section |
/// | 1 | `NotDominant` | judged without probability, not dominant |
/// | 2 | `IIIPlus` | `p ≤ Ps/(1000·N)` |
/// | 3 | `IIPlus` | `p ≤ Ps/(100·N)` |
/// | 4 | `IPlus` | `p ≤ Ps/(10·N)` |
/// | 5 | `Zero` | `p ≤ Ps/N` |
/// | 6 | `IMin` | `p ≤ Pmax/N` |
/// | 7 | `IIMin` | `p ≤ 10·Pmax/N` |
/// | 8 | `IIIMin` | `p ≤ 1` |
/// | 9 | `Dominant` | judged without probability, dominant |
/// | 10 | `NoResult` | not yet assessed |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterpretationCategory {
    /// +III
    IIIPlus,
    /// +II
    IIPlus,
    /// +I
    IPlus,
    /// 0
    Zero,
    /// -I
    IMin,
    /// -II
    IIMin,
    /// -III
    IIIMin,
    /// Not dominant, no probability
    NotDominant,
    /// Dominant, no probability
    Dominant,
    /// Mechanism not relevant for the section
    NotRelevant,
    /// Not yet assessed
    NoResult,
}

impl InterpretationCategory {
    /// Every category, best to worst
    pub const ALL: [InterpretationCategory; 11] = [
        Self::NotRelevant,
        Self::NotDominant,
        Self::IIIPlus,
        Self::IIPlus,
        Self::IPlus,
        Self::Zero,
        Self::IMin,
        Self::IIMin,
        Self::IIIMin,
        Self::Dominant,
        Self::NoResult,
    ];

    /// The categories a probability can map to, best to worst
    pub const PROBABILISTIC: [InterpretationCategory; 7] = [
        Self::IIIPlus,
        Self::IIPlus,
        Self::IPlus,
        Self::Zero,
        Self::IMin,
        Self::IIMin,
        Self::IIIMin,
    ];

    /// Short label as used in regulatory tables
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IIIPlus => "+III",
            Self::IIPlus => "+II",
            Self::IPlus => "+I",
            Self::Zero => "0",
            Self::IMin => "-I",
            Self::IIMin => "-II",
            Self::IIIMin => "-III",
            Self::NotDominant => "ND",
            Self::Dominant => "D",
            Self::NotRelevant => "NR",
            Self::NoResult => "NoResult",
        }
    }

    /// Parse a label produced by [`as_str`](Self::as_str)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Whether this category denotes "not yet assessed"
    pub fn is_no_result(&self) -> bool {
        matches!(self, Self::NoResult)
    }
}

impl CategoryKind for InterpretationCategory {
    fn rank(&self) -> u8 {
        match self {
            Self::NotRelevant => 0,
            Self::NotDominant => 1,
            Self::IIIPlus => 2,
            Self::IIPlus => 3,
            Self::IPlus => 4,
            Self::Zero => 5,
            Self::IMin => 6,
            Self::IIMin => 7,
            Self::IIIMin => 8,
            Self::Dominant => 9,
            Self::NoResult => 10,
        }
    }
}

impl Ord for InterpretationCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for InterpretationCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for InterpretationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InterpretationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid interpretation category: {}", s))
    }
}
