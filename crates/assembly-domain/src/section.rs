//! Sections along the assessment section and contiguous section lists

use crate::error::{AssemblyError, ErrorCollector, Result};
use crate::tolerance::Tolerance;
use crate::{InterpretationCategory, Probability};
use serde::{Deserialize, Serialize};

/// Kind of annotation a section carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// No annotation
    Plain,
    /// Interpretation category only
    Category,
    /// Probability and the interpretation category derived from it
    Probability,
}

/// Annotation of a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionPayload {
    /// No annotation
    Plain,
    /// Interpretation category only
    Category {
        /// The category
        category: InterpretationCategory,
    },
    /// Probability with its interpretation category
    Probability {
        /// Section failure probability
        probability: Probability,
        /// The category
        category: InterpretationCategory,
    },
}

impl SectionPayload {
    /// Kind of this payload
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Plain => SectionKind::Plain,
            Self::Category { .. } => SectionKind::Category,
            Self::Probability { .. } => SectionKind::Probability,
        }
    }

    /// Category, if the payload carries one
    pub fn category(&self) -> Option<InterpretationCategory> {
        match self {
            Self::Plain => None,
            Self::Category { category } | Self::Probability { category, .. } => Some(*category),
        }
    }

    /// Probability, if the payload carries one
    pub fn probability(&self) -> Option<Probability> {
        match self {
            Self::Probability { probability, .. } => Some(*probability),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawSection {
    start: f64,
    end: f64,
    payload: SectionPayload,
}

/// Interval `[start, end)` in meters along the assessment section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSection")]
pub struct Section {
    start: f64,
    end: f64,
    payload: SectionPayload,
}

impl Section {
    /// Create a section; requires finite `0 ≤ start < end`
    pub fn new(start: f64, end: f64, payload: SectionPayload) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end <= start {
            return Err(AssemblyError::SectionBoundsInvalid { start, end });
        }
        Ok(Self {
            start,
            end,
            payload,
        })
    }

    /// Section without annotation
    pub fn plain(start: f64, end: f64) -> Result<Self> {
        Self::new(start, end, SectionPayload::Plain)
    }

    /// Section with an interpretation category
    pub fn with_category(start: f64, end: f64, category: InterpretationCategory) -> Result<Self> {
        Self::new(start, end, SectionPayload::Category { category })
    }

    /// Section with a probability and its interpretation category
    pub fn with_probability(
        start: f64,
        end: f64,
        probability: Probability,
        category: InterpretationCategory,
    ) -> Result<Self> {
        Self::new(
            start,
            end,
            SectionPayload::Probability {
                probability,
                category,
            },
        )
    }

    /// Start in meters
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End in meters
    pub fn end(&self) -> f64 {
        self.end
    }

    /// `end - start`
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Center of the interval
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// The annotation
    pub fn payload(&self) -> &SectionPayload {
        &self.payload
    }

    /// Kind of the annotation
    pub fn kind(&self) -> SectionKind {
        self.payload.kind()
    }

    /// Category, if annotated with one
    pub fn category(&self) -> Option<InterpretationCategory> {
        self.payload.category()
    }

    /// Probability, if annotated with one
    pub fn probability(&self) -> Option<Probability> {
        self.payload.probability()
    }

    /// Whether `position` lies in `[start, end)`
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start && position < self.end
    }
}

impl TryFrom<RawSection> for Section {
    type Error = AssemblyError;

    fn try_from(raw: RawSection) -> Result<Self> {
        Self::new(raw.start, raw.end, raw.payload)
    }
}

#[derive(Deserialize)]
struct RawSectionList {
    name: String,
    sections: Vec<Section>,
}

/// Contiguous, homogeneous list of sections starting at 0
///
/// The list is the unit the common-section merge operates on; construction
/// guarantees it starts at 0, has no gaps or overlaps (within
/// [`Tolerance::LENGTH`]) and that all sections share one payload kind.
///
/// # Examples
///
/// ```
/// use assembly_domain::{InterpretationCategory, Section, SectionList};
///
/// let list = SectionList::new(
///     "STPH",
///     vec![
///         Section::with_category(0.0, 30.0, InterpretationCategory::Zero).unwrap(),
///         Section::with_category(30.0, 100.0, InterpretationCategory::IMin).unwrap(),
///     ],
/// )
/// .unwrap();
/// assert_eq!(list.total_length(), 100.0);
/// assert_eq!(list.category_at(45.0), Some(InterpretationCategory::IMin));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSectionList")]
pub struct SectionList {
    name: String,
    sections: Vec<Section>,
}

impl SectionList {
    /// Validate and create a section list named after its mechanism
    ///
    /// Reports every gap, overlap, invalid start and kind mismatch found.
    pub fn new(name: impl Into<String>, sections: Vec<Section>) -> Result<Self> {
        let name = name.into();
        let tolerance = Tolerance::LENGTH;
        let Some(first) = sections.first() else {
            return Err(AssemblyError::SectionListEmpty { list: name });
        };

        let mut errors = ErrorCollector::new();
        if !tolerance.approx_eq(first.start, 0.0) {
            errors.push(AssemblyError::SectionListInvalidStart {
                list: name.clone(),
                start: first.start,
            });
        }

        let expected = first.kind();
        for (index, section) in sections.iter().enumerate().skip(1) {
            let previous_end = sections[index - 1].end;
            if !tolerance.approx_eq(previous_end, section.start) {
                errors.push(AssemblyError::SectionListNotContiguous {
                    list: name.clone(),
                    index,
                    previous_end,
                    start: section.start,
                });
            }
            if section.kind() != expected {
                errors.push(AssemblyError::SectionListHeterogeneous {
                    list: name.clone(),
                    index,
                    expected,
                    found: section.kind(),
                });
            }
        }

        errors.finish_with(Self { name, sections })
    }

    /// Mechanism (or result) this list belongs to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sections, in order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterate over the sections
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; construction rejects empty lists
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Payload kind shared by all sections
    pub fn kind(&self) -> SectionKind {
        self.sections[0].kind()
    }

    /// Whether every section carries a category
    pub fn has_categories(&self) -> bool {
        self.kind() != SectionKind::Plain
    }

    /// End of the last section
    pub fn total_length(&self) -> f64 {
        self.sections[self.sections.len() - 1].end
    }

    /// Start of the first section followed by the end of every section
    pub fn breakpoints(&self) -> Vec<f64> {
        std::iter::once(self.sections[0].start)
            .chain(self.sections.iter().map(|s| s.end))
            .collect()
    }

    /// Section containing `position`; the end of the list belongs to the
    /// last section
    pub fn section_at(&self, position: f64) -> Option<&Section> {
        if position < 0.0 || position > self.total_length() {
            return None;
        }
        let index = self.sections.partition_point(|s| s.end <= position);
        self.sections
            .get(index)
            .or_else(|| self.sections.last())
    }

    /// Category of the section containing `position`
    pub fn category_at(&self, position: f64) -> Option<InterpretationCategory> {
        self.section_at(position).and_then(Section::category)
    }
}

impl TryFrom<RawSectionList> for SectionList {
    type Error = AssemblyError;

    fn try_from(raw: RawSectionList) -> Result<Self> {
        Self::new(raw.name, raw.sections)
    }
}

impl<'a> IntoIterator for &'a SectionList {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
