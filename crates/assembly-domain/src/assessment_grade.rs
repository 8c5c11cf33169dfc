//! Assessment grades of a whole assessment section

use crate::category::CategoryKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Safety grade of an assessment section, A+ (best) to D (worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentGrade {
    /// `p ≤ Ps/30`
    APlus,
    /// `p ≤ Ps`
    A,
    /// `p ≤ Pmax`
    B,
    /// `p ≤ 30·Pmax`
    C,
    /// `p ≤ 1`
    D,
    /// No judgement possible
    NoResult,
}

impl AssessmentGrade {
    /// Grades a probability can map to, best to worst
    pub const PROBABILISTIC: [AssessmentGrade; 5] =
        [Self::APlus, Self::A, Self::B, Self::C, Self::D];

    /// Label as used in regulatory tables
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::NoResult => "NoResult",
        }
    }

    /// Parse a label produced by [`as_str`](Self::as_str)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A+" => Some(Self::APlus),
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "NORESULT" => Some(Self::NoResult),
            _ => None,
        }
    }
}

impl CategoryKind for AssessmentGrade {
    fn rank(&self) -> u8 {
        match self {
            Self::APlus => 0,
            Self::A => 1,
            Self::B => 2,
            Self::C => 3,
            Self::D => 4,
            Self::NoResult => 5,
        }
    }
}

impl Ord for AssessmentGrade {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for AssessmentGrade {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AssessmentGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssessmentGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid assessment grade: {}", s))
    }
}
