//! Assessment section and its regulatory norms

use crate::error::{AssemblyError, ErrorCollector, Result};
use crate::Probability;
use serde::{Deserialize, Serialize};

/// Check the two regulatory norms
///
/// Both must be defined, positive and at most 1, and the signal probability
/// may not exceed the maximum allowable probability. All violations are
/// reported together.
pub fn validate_norms(signal: Probability, maximum: Probability) -> Result<()> {
    validate_raw_norms(signal.value(), maximum.value())
}

fn validate_raw_norms(signal: f64, maximum: f64) -> Result<()> {
    let mut errors = ErrorCollector::new();
    for (norm, value) in [
        ("signal probability", signal),
        ("maximum allowable probability", maximum),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            errors.push(AssemblyError::NormOutOfRange {
                norm: norm.to_string(),
                value,
            });
        }
    }
    if errors.is_empty() && signal > maximum {
        errors.push(AssemblyError::SignalProbabilityExceedsMaximum { signal, maximum });
    }
    errors.finish()
}

#[derive(Deserialize)]
struct RawAssessmentSection {
    length: f64,
    signal_probability: Probability,
    maximum_allowable_probability: Probability,
}

/// A dike trajectory judged as one unit
///
/// # Examples
///
/// ```
/// use assembly_domain::AssessmentSection;
///
/// let section = AssessmentSection::new(12_500.0, 1.0 / 30_000.0, 1.0 / 10_000.0).unwrap();
/// assert_eq!(section.length(), 12_500.0);
/// assert!(AssessmentSection::new(12_500.0, 1.0 / 1_000.0, 1.0 / 10_000.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssessmentSection")]
pub struct AssessmentSection {
    length: f64,
    signal_probability: Probability,
    maximum_allowable_probability: Probability,
}

impl AssessmentSection {
    /// Validate and create an assessment section from raw norms
    pub fn new(length: f64, signal_probability: f64, maximum_allowable_probability: f64) -> Result<Self> {
        let mut errors = ErrorCollector::new();
        if !length.is_finite() || length <= 0.0 {
            errors.push(AssemblyError::LengthOutOfRange {
                entity: "assessment section".to_string(),
                value: length,
            });
        }
        errors.collect(validate_raw_norms(signal_probability, maximum_allowable_probability));
        errors.finish()?;

        Ok(Self {
            length,
            signal_probability: Probability::new(signal_probability)?,
            maximum_allowable_probability: Probability::new(maximum_allowable_probability)?,
        })
    }

    /// Validate and create an assessment section from norm probabilities
    pub fn from_norms(length: f64, signal: Probability, maximum: Probability) -> Result<Self> {
        Self::new(length, signal.value(), maximum.value())
    }

    /// Length in meters
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Signal probability `Ps`
    pub fn signal_probability(&self) -> Probability {
        self.signal_probability
    }

    /// Maximum allowable probability `Pmax`
    pub fn maximum_allowable_probability(&self) -> Probability {
        self.maximum_allowable_probability
    }
}

impl TryFrom<RawAssessmentSection> for AssessmentSection {
    type Error = AssemblyError;

    fn try_from(raw: RawAssessmentSection) -> Result<Self> {
        Self::from_norms(
            raw.length,
            raw.signal_probability,
            raw.maximum_allowable_probability,
        )
    }
}
