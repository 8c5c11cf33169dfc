//! Categories of a failure mechanism as a whole

use crate::category::CategoryKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Category of an assembled failure mechanism, It (best) to VIt (worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMechanismCategory {
    /// `p ≤ Ps/(30·N)`
    It,
    /// `p ≤ Ps/N`
    IIt,
    /// `p ≤ Pmax/N`
    IIIt,
    /// `p ≤ Pmax`
    IVt,
    /// `p ≤ 30·Pmax`
    Vt,
    /// `p ≤ 1`
    VIt,
    /// No judgement possible
    NoResult,
}

impl FailureMechanismCategory {
    /// Categories a probability can map to, best to worst
    pub const PROBABILISTIC: [FailureMechanismCategory; 6] =
        [Self::It, Self::IIt, Self::IIIt, Self::IVt, Self::Vt, Self::VIt];

    /// Label as used in regulatory tables
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::It => "It",
            Self::IIt => "IIt",
            Self::IIIt => "IIIt",
            Self::IVt => "IVt",
            Self::Vt => "Vt",
            Self::VIt => "VIt",
            Self::NoResult => "NoResult",
        }
    }
}

impl CategoryKind for FailureMechanismCategory {
    fn rank(&self) -> u8 {
        match self {
            Self::It => 0,
            Self::IIt => 1,
            Self::IIIt => 2,
            Self::IVt => 3,
            Self::Vt => 4,
            Self::VIt => 5,
            Self::NoResult => 6,
        }
    }
}

impl Ord for FailureMechanismCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for FailureMechanismCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FailureMechanismCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
