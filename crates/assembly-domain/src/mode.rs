//! Full or partial assembly

use serde::{Deserialize, Serialize};

/// How not-yet-assessed inputs are treated
///
/// Chosen once at the top of an assembly pipeline and handed down unchanged,
/// so mechanism-level and section-level assembly always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyMode {
    /// Every input must be assessed; any gap yields "no judgement possible"
    #[default]
    Full,
    /// Not-yet-assessed inputs are left out of the combination
    Partial,
}

impl AssemblyMode {
    /// Whether not-yet-assessed inputs are skipped
    pub fn is_partial(self) -> bool {
        matches!(self, Self::Partial)
    }

    /// Name as used in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
        }
    }
}
