//! Assessment result of one failure mechanism section

use crate::error::{AssemblyError, ErrorCollector, Result};
use crate::Probability;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct RawSectionResult {
    section: String,
    length: f64,
    probability_profile: Option<f64>,
    probability_section: Option<f64>,
}

/// Profile and section probability of one failure mechanism section
///
/// The profile probability describes a representative cross-section, the
/// section probability the whole section including its length effect. An
/// undefined section probability means the section has not been assessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSectionResult")]
pub struct FailureMechanismSectionResult {
    section: String,
    length: f64,
    probability_profile: Probability,
    probability_section: Probability,
}

impl FailureMechanismSectionResult {
    /// Validate raw probabilities and create a section result
    ///
    /// NaN is accepted as "not assessed". Out-of-range probabilities fail
    /// with `FailureProbabilityOutOfRange` naming the section; all defects
    /// of the section are reported together.
    pub fn new(
        section: impl Into<String>,
        length: f64,
        probability_profile: f64,
        probability_section: f64,
    ) -> Result<Self> {
        let section = section.into();
        let mut errors = ErrorCollector::new();
        let mut checked = |value: f64| {
            Probability::new(value).unwrap_or_else(|_| {
                errors.push(AssemblyError::FailureProbabilityOutOfRange {
                    section: section.clone(),
                    value,
                });
                Probability::UNDEFINED
            })
        };
        let profile = checked(probability_profile);
        let section_probability = checked(probability_section);

        errors.collect(Self::from_probabilities(
            section.clone(),
            length,
            profile,
            section_probability,
        ));
        errors.finish_with(Self {
            section,
            length,
            probability_profile: profile,
            probability_section: section_probability,
        })
    }

    /// Create a section result from validated probabilities
    pub fn from_probabilities(
        section: impl Into<String>,
        length: f64,
        probability_profile: Probability,
        probability_section: Probability,
    ) -> Result<Self> {
        let section = section.into();
        let mut errors = ErrorCollector::new();
        if !length.is_finite() || length <= 0.0 {
            errors.push(AssemblyError::LengthOutOfRange {
                entity: section.clone(),
                value: length,
            });
        }
        if probability_profile.is_defined()
            && probability_section.is_defined()
            && probability_profile.value() > probability_section.value()
        {
            errors.push(AssemblyError::ProfileProbabilityExceedsSectionProbability {
                section: section.clone(),
                profile: probability_profile.value(),
                section_probability: probability_section.value(),
            });
        }
        errors.finish_with(Self {
            section,
            length,
            probability_profile,
            probability_section,
        })
    }

    /// Section without length effect: profile and section probability coincide
    pub fn with_section_probability(
        section: impl Into<String>,
        length: f64,
        probability: f64,
    ) -> Result<Self> {
        Self::new(section, length, probability, probability)
    }

    /// Section that has not been assessed yet
    pub fn not_assessed(section: impl Into<String>, length: f64) -> Result<Self> {
        Self::from_probabilities(section, length, Probability::UNDEFINED, Probability::UNDEFINED)
    }

    /// Section identifier
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Length in meters
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Probability of the representative profile
    pub fn probability_profile(&self) -> Probability {
        self.probability_profile
    }

    /// Probability of the whole section
    pub fn probability_section(&self) -> Probability {
        self.probability_section
    }

    /// Whether the section has been assessed
    pub fn is_assessed(&self) -> bool {
        self.probability_section.is_defined()
    }

    /// Length-effect factor of the section, `section / profile`
    ///
    /// Falls back to exactly 1.0 when either probability is undefined or
    /// the profile probability is zero.
    pub fn n_section(&self) -> f64 {
        if !self.probability_profile.is_defined()
            || !self.probability_section.is_defined()
            || self.probability_profile.value() == 0.0
        {
            return 1.0;
        }
        self.probability_section.value() / self.probability_profile.value()
    }
}

impl TryFrom<RawSectionResult> for FailureMechanismSectionResult {
    type Error = AssemblyError;

    fn try_from(raw: RawSectionResult) -> Result<Self> {
        Self::new(
            raw.section,
            raw.length,
            raw.probability_profile.unwrap_or(f64::NAN),
            raw.probability_section.unwrap_or(f64::NAN),
        )
    }
}
