//! Error taxonomy for every assembly layer
//!
//! Each concrete failure is one [`AssemblyError`] variant carrying the
//! identifier of the offending entity. Variants group into the five kinds of
//! [`ErrorKind`]. Validation passes that find several independent defects
//! report them together as [`AssemblyError::Multiple`], built with
//! [`ErrorCollector`].

use crate::section::SectionKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the assembly crates
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Coarse classification of an [`AssemblyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A probability, length or factor outside its legal interval
    Range,
    /// A category or section list that is not a gapless partition
    Shape,
    /// Section lists that disagree with each other or lack annotations
    Consistency,
    /// An assembly call without anything to assemble
    EmptyInput,
    /// An undefined probability where a concrete value is required
    UndefinedValue,
}

/// Errors raised while validating inputs or assembling results
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// Raw probability outside [0, 1]
    #[error("Probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange {
        /// The rejected value
        value: f64,
    },

    /// Section failure probability outside [0, 1]
    #[error("Failure probability {value} of section '{section}' is outside [0, 1]")]
    FailureProbabilityOutOfRange {
        /// Offending section
        section: String,
        /// The rejected value
        value: f64,
    },

    /// Profile probability larger than the section probability
    #[error("Profile probability {profile} of section '{section}' exceeds its section probability {section_probability}")]
    ProfileProbabilityExceedsSectionProbability {
        /// Offending section
        section: String,
        /// Profile probability
        profile: f64,
        /// Section probability
        section_probability: f64,
    },

    /// Length-effect factor below 1
    #[error("Length-effect factor {value} of '{entity}' must be at least 1")]
    LengthEffectFactorOutOfRange {
        /// Mechanism or calculation the factor belongs to
        entity: String,
        /// The rejected value
        value: f64,
    },

    /// A regulatory norm that is undefined or outside (0, 1]
    #[error("Norm '{norm}' = {value} must be in (0, 1]")]
    NormOutOfRange {
        /// Which norm
        norm: String,
        /// The rejected value
        value: f64,
    },

    /// Signal probability larger than the maximum allowable probability
    #[error("Signal probability {signal} exceeds maximum allowable probability {maximum}")]
    SignalProbabilityExceedsMaximum {
        /// Signal probability
        signal: f64,
        /// Maximum allowable probability
        maximum: f64,
    },

    /// Non-positive or non-finite length
    #[error("Length {value} of '{entity}' must be positive")]
    LengthOutOfRange {
        /// Section or assessment section the length belongs to
        entity: String,
        /// The rejected value
        value: f64,
    },

    /// Section whose end does not lie beyond its start
    #[error("Section [{start}, {end}) is invalid: start must be >= 0 and end > start")]
    SectionBoundsInvalid {
        /// Start in meters
        start: f64,
        /// End in meters
        end: f64,
    },

    /// Category whose lower limit lies above its upper limit
    #[error("Category {category} has lower limit {lower} above upper limit {upper}")]
    CategoryLimitsInverted {
        /// Category label
        category: String,
        /// Lower limit
        lower: f64,
        /// Upper limit
        upper: f64,
    },

    /// Category with an undefined limit
    #[error("Category {category} has an undefined limit")]
    CategoryLimitUndefined {
        /// Category label
        category: String,
    },

    /// Category list without categories
    #[error("Category list is empty")]
    CategoryListEmpty,

    /// First category does not start at 0
    #[error("Category list must start at 0, but {category} starts at {lower}")]
    CategoryListInvalidLowerLimit {
        /// First category
        category: String,
        /// Its lower limit
        lower: f64,
    },

    /// Last category does not end at 1
    #[error("Category list must end at 1, but {category} ends at {upper}")]
    CategoryListInvalidUpperLimit {
        /// Last category
        category: String,
        /// Its upper limit
        upper: f64,
    },

    /// Gap or overlap between two consecutive categories
    #[error("Categories {previous} and {next} are not contiguous ({upper} != {lower})")]
    CategoryListNotContiguous {
        /// Lower category
        previous: String,
        /// Following category
        next: String,
        /// Upper limit of `previous`
        upper: f64,
        /// Lower limit of `next`
        lower: f64,
    },

    /// Section list without sections
    #[error("Section list '{list}' is empty")]
    SectionListEmpty {
        /// Mechanism the list belongs to
        list: String,
    },

    /// First section does not start at 0
    #[error("Section list '{list}' must start at 0, but starts at {start}")]
    SectionListInvalidStart {
        /// Mechanism the list belongs to
        list: String,
        /// Start of the first section
        start: f64,
    },

    /// Gap or overlap between two consecutive sections
    #[error("Section {index} of list '{list}' starts at {start}, previous section ends at {previous_end}")]
    SectionListNotContiguous {
        /// Mechanism the list belongs to
        list: String,
        /// Index of the offending section
        index: usize,
        /// End of the preceding section
        previous_end: f64,
        /// Start of the offending section
        start: f64,
    },

    /// Sections with different payload kinds in one list
    #[error("Section {index} of list '{list}' is {found:?}, expected {expected:?}")]
    SectionListHeterogeneous {
        /// Mechanism the list belongs to
        list: String,
        /// Index of the offending section
        index: usize,
        /// Kind of the first section
        expected: SectionKind,
        /// Kind of the offending section
        found: SectionKind,
    },

    /// Section lists that do not cover the same total length
    #[error("Section list '{list}' covers {length} m, expected {expected} m")]
    CommonFailureMechanismSectionsInvalid {
        /// Mechanism the list belongs to
        list: String,
        /// Length covered by the list
        length: f64,
        /// Shared total length
        expected: f64,
    },

    /// Section list without category annotations
    #[error("Section list '{list}' carries no categories")]
    SectionsWithoutCategory {
        /// Mechanism the list belongs to
        list: String,
    },

    /// Section list without probability annotations
    #[error("Section list '{list}' carries no probabilities")]
    SectionsWithoutProbability {
        /// Mechanism the list belongs to
        list: String,
    },

    /// Translated section list that is not on the shared common-section grid
    #[error("Section list '{list}' is not on the common sections: section {index} differs")]
    CommonSectionsMismatch {
        /// Mechanism the list belongs to
        list: String,
        /// First section that differs, or the shorter length
        index: usize,
    },

    /// Section category that contradicts the section's own probability
    #[error("Section {index} of list '{list}' is labelled {found}, but its probability {probability} is {expected}")]
    SectionCategoryInconsistent {
        /// Mechanism the list belongs to
        list: String,
        /// Index of the offending section
        index: usize,
        /// Category carried by the section
        found: String,
        /// Category derived from the section probability
        expected: String,
        /// Section probability
        probability: f64,
    },

    /// Nothing to assemble
    #[error("No input to assemble for '{entity}'")]
    EmptyInput {
        /// Mechanism or assessment section being assembled
        entity: String,
    },

    /// Undefined probability where a value is required
    #[error("Undefined probability in {context}")]
    UndefinedProbability {
        /// Operation that required the value
        context: String,
    },

    /// Several independent errors found in one validation pass
    #[error("{} errors: {}", .0.len(), join_messages(.0))]
    Multiple(Vec<AssemblyError>),
}

fn join_messages(errors: &[AssemblyError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AssemblyError {
    /// Kind of this error; `Multiple` reports the kind of its first member
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProbabilityOutOfRange { .. }
            | Self::FailureProbabilityOutOfRange { .. }
            | Self::ProfileProbabilityExceedsSectionProbability { .. }
            | Self::LengthEffectFactorOutOfRange { .. }
            | Self::NormOutOfRange { .. }
            | Self::SignalProbabilityExceedsMaximum { .. }
            | Self::LengthOutOfRange { .. }
            | Self::SectionBoundsInvalid { .. }
            | Self::CategoryLimitsInverted { .. } => ErrorKind::Range,
            Self::CategoryListEmpty
            | Self::CategoryListInvalidLowerLimit { .. }
            | Self::CategoryListInvalidUpperLimit { .. }
            | Self::CategoryListNotContiguous { .. }
            | Self::SectionListEmpty { .. }
            | Self::SectionListInvalidStart { .. }
            | Self::SectionListNotContiguous { .. }
            | Self::SectionListHeterogeneous { .. } => ErrorKind::Shape,
            Self::CommonFailureMechanismSectionsInvalid { .. }
            | Self::SectionsWithoutCategory { .. }
            | Self::SectionsWithoutProbability { .. }
            | Self::CommonSectionsMismatch { .. }
            | Self::SectionCategoryInconsistent { .. } => ErrorKind::Consistency,
            Self::EmptyInput { .. } => ErrorKind::EmptyInput,
            Self::CategoryLimitUndefined { .. } | Self::UndefinedProbability { .. } => {
                ErrorKind::UndefinedValue
            }
            Self::Multiple(errors) => errors
                .first()
                .map(AssemblyError::kind)
                .unwrap_or(ErrorKind::Shape),
        }
    }

    /// All individual errors, with `Multiple` flattened
    pub fn errors(&self) -> Vec<&AssemblyError> {
        match self {
            Self::Multiple(errors) => errors.iter().flat_map(AssemblyError::errors).collect(),
            single => vec![single],
        }
    }

    /// Whether any individual error is of the given kind
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.errors().iter().any(|e| e.kind() == kind)
    }
}

/// Accumulates independent validation errors so a caller can fix all of
/// them in one pass
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<AssemblyError>,
}

impl ErrorCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; nested `Multiple` errors are flattened
    pub fn push(&mut self, error: AssemblyError) {
        match error {
            AssemblyError::Multiple(errors) => {
                for error in errors {
                    self.push(error);
                }
            }
            error => self.errors.push(error),
        }
    }

    /// Keep the value of a successful result, record the error otherwise
    pub fn collect<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` when clean, the single error, or all of them as `Multiple`
    pub fn finish(self) -> Result<()> {
        self.finish_with(())
    }

    /// Like [`finish`](Self::finish), returning `value` when clean
    pub fn finish_with<T>(mut self, value: T) -> Result<T> {
        match self.errors.len() {
            0 => Ok(value),
            1 => Err(self.errors.remove(0)),
            _ => Err(AssemblyError::Multiple(self.errors)),
        }
    }
}
