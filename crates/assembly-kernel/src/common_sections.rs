//! Common-section assembly
//!
//! Every failure mechanism divides the assessment section into its own
//! sections. To report one verdict per location the section lists are merged
//! into their finest common refinement, each mechanism's categories are
//! carried over onto that refinement, and the worst category wins per common
//! section.
//!
//! ```text
//! STPH  |  III+     |  I-   |        II-        |
//! GEKB  |       0           |        I-         |
//! common|-----------|-------|-------------------|
//!        0          30      50                  100
//! ```

use assembly_domain::{
    AssemblyError, AssemblyMode, CategoryKind, ErrorCollector, InterpretationCategory,
    Probability, Result, Section, SectionKind, SectionList, SectionPayload, Tolerance,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Name of the list holding the finest common refinement
pub const COMMON_SECTIONS: &str = "common";

/// Name of the list holding the combined verdict per common section
pub const COMBINED_SECTIONS: &str = "combined";

/// Everything produced by [`CommonSectionAssembler::assemble`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonSectionsResult {
    /// Finest common refinement, without annotations
    pub common_sections: SectionList,
    /// Each mechanism's categories on the common sections, in input order
    pub translated: Vec<SectionList>,
    /// Worst category per common section
    pub combined: SectionList,
}

/// Merges the section lists of several failure mechanisms
///
/// All operations check their inputs up front and report every problem
/// found; merging is a single sweep over the lists with one cursor each.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonSectionAssembler;

impl CommonSectionAssembler {
    /// Create an assembler
    pub fn new() -> Self {
        Self
    }

    /// Merge category-bearing section lists and combine their verdicts
    ///
    /// # Examples
    ///
    /// ```
    /// use assembly_domain::{AssemblyMode, InterpretationCategory as Ic, Section, SectionList};
    /// use assembly_kernel::CommonSectionAssembler;
    ///
    /// let stph = SectionList::new("STPH", vec![
    ///     Section::with_category(0.0, 50.0, Ic::IPlus).unwrap(),
    ///     Section::with_category(50.0, 100.0, Ic::IMin).unwrap(),
    /// ]).unwrap();
    /// let gekb = SectionList::new("GEKB", vec![
    ///     Section::with_category(0.0, 30.0, Ic::IIMin).unwrap(),
    ///     Section::with_category(30.0, 100.0, Ic::Zero).unwrap(),
    /// ]).unwrap();
    ///
    /// let result = CommonSectionAssembler::new()
    ///     .assemble(&[stph, gekb], 100.0, AssemblyMode::Full)
    ///     .unwrap();
    /// let verdicts: Vec<_> = result.combined.iter().filter_map(|s| s.category()).collect();
    /// assert_eq!(verdicts, vec![Ic::IIMin, Ic::Zero, Ic::IMin]);
    /// ```
    pub fn assemble(
        &self,
        lists: &[SectionList],
        total_length: f64,
        mode: AssemblyMode,
    ) -> Result<CommonSectionsResult> {
        validate_lists(lists, total_length, Some(SectionKind::Category))?;

        let common_sections = sweep(lists, total_length)?;
        let translated = lists
            .iter()
            .map(|list| translate(list, &common_sections))
            .collect::<Result<Vec<_>>>()?;
        let combined = self.determine_combined_result_per_common_section(&translated, mode)?;

        tracing::debug!(
            mechanisms = lists.len(),
            common_sections = common_sections.len(),
            mode = mode.as_str(),
            "assembled common sections"
        );
        Ok(CommonSectionsResult {
            common_sections,
            translated,
            combined,
        })
    }

    /// Finest common refinement of `lists`
    ///
    /// Breakpoints closer than [`Tolerance::LENGTH`] collapse into one; the
    /// last section always ends exactly at `total_length`.
    pub fn find_common_sections(&self, lists: &[SectionList], total_length: f64) -> Result<SectionList> {
        validate_lists(lists, total_length, None)?;
        sweep(lists, total_length)
    }

    /// Carry the annotations of `list` over onto `common_sections`
    ///
    /// Each common section takes the payload of the section of `list` that
    /// contains its midpoint.
    pub fn translate_to_common_sections(
        &self,
        list: &SectionList,
        common_sections: &SectionList,
    ) -> Result<SectionList> {
        let mut errors = ErrorCollector::new();
        if !list.has_categories() {
            errors.push(AssemblyError::SectionsWithoutCategory {
                list: list.name().to_string(),
            });
        }
        errors.collect(check_length(list, common_sections.total_length()));
        errors.finish()?;
        translate(list, common_sections)
    }

    /// Worst category per common section over translated lists
    ///
    /// In partial mode sections without result are left out per common
    /// section; a common section where nothing is left gets
    /// [`InterpretationCategory::NoResult`].
    pub fn determine_combined_result_per_common_section(
        &self,
        translated: &[SectionList],
        mode: AssemblyMode,
    ) -> Result<SectionList> {
        let grid = check_grid(translated)?;

        let sections = grid
            .iter()
            .enumerate()
            .map(|(index, common)| {
                let category = translated
                    .iter()
                    .filter_map(|list| list.sections()[index].category())
                    .filter(|category| !(mode.is_partial() && category.is_no_result()))
                    .reduce(InterpretationCategory::worst)
                    .unwrap_or(InterpretationCategory::NoResult);
                Section::with_category(common.start(), common.end(), category)
            })
            .collect::<Result<Vec<_>>>()?;

        SectionList::new(COMBINED_SECTIONS, sections)
    }

    /// Independent union of the mechanisms' probabilities per common section
    ///
    /// Every list must carry probabilities. The category of each combined
    /// section is the worst category of the contributing sections. In
    /// partial mode undefined probabilities are left out.
    pub fn combine_probabilities_per_common_section(
        &self,
        lists: &[SectionList],
        total_length: f64,
        mode: AssemblyMode,
    ) -> Result<SectionList> {
        validate_lists(lists, total_length, Some(SectionKind::Probability))?;

        let common_sections = sweep(lists, total_length)?;
        let translated = lists
            .iter()
            .map(|list| translate(list, &common_sections))
            .collect::<Result<Vec<_>>>()?;

        let sections = common_sections
            .iter()
            .enumerate()
            .map(|(index, common)| {
                let parts = translated
                    .iter()
                    .map(|list| &list.sections()[index])
                    .filter(|section| {
                        !mode.is_partial()
                            || section.probability().is_some_and(Probability::is_defined)
                    });
                let mut probabilities = Vec::with_capacity(translated.len());
                let mut category = None;
                for section in parts {
                    probabilities.extend(section.probability());
                    category = match (category, section.category()) {
                        (Some(worst), Some(next)) => Some(CategoryKind::worst(worst, next)),
                        (worst, next) => worst.or(next),
                    };
                }
                let probability = if probabilities.is_empty() {
                    Probability::UNDEFINED
                } else {
                    Probability::union_all(probabilities)
                };
                let category = category.unwrap_or(InterpretationCategory::NoResult);
                Section::with_probability(common.start(), common.end(), probability, category)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            mechanisms = lists.len(),
            common_sections = sections.len(),
            "combined probabilities per common section"
        );
        SectionList::new(COMBINED_SECTIONS, sections)
    }

    /// Collapse neighbouring sections with the same verdict
    ///
    /// Categories must match exactly; probabilities must differ by at most
    /// `negligible_difference` in reliability-index space, and the merged
    /// section keeps the larger one. Plain sections always merge. The total
    /// length is preserved.
    pub fn merge_equal_adjacent(
        &self,
        list: &SectionList,
        negligible_difference: f64,
    ) -> Result<SectionList> {
        let mut merged: Vec<Section> = Vec::with_capacity(list.len());
        for section in list {
            let joined = match merged.last() {
                Some(previous) => join(previous, section, negligible_difference)?,
                None => None,
            };
            match joined {
                Some(section) => {
                    if let Some(last) = merged.last_mut() {
                        *last = section;
                    }
                }
                None => merged.push(*section),
            }
        }

        tracing::debug!(
            list = list.name(),
            before = list.len(),
            after = merged.len(),
            "merged equal adjacent sections"
        );
        SectionList::new(list.name(), merged)
    }
}

/// Up-front checks shared by the merging operations
fn validate_lists(lists: &[SectionList], total_length: f64, required: Option<SectionKind>) -> Result<()> {
    if lists.is_empty() {
        return Err(AssemblyError::EmptyInput {
            entity: "common sections".to_string(),
        });
    }
    if !total_length.is_finite() || total_length <= 0.0 {
        return Err(AssemblyError::LengthOutOfRange {
            entity: "common sections".to_string(),
            value: total_length,
        });
    }

    let mut errors = ErrorCollector::new();
    for list in lists {
        errors.collect(check_length(list, total_length));
        if let Some(required) = required {
            errors.collect(check_kind(list, required));
        }
    }
    errors.finish()
}

fn check_length(list: &SectionList, total_length: f64) -> Result<()> {
    if Tolerance::LENGTH.approx_eq(list.total_length(), total_length) {
        return Ok(());
    }
    Err(AssemblyError::CommonFailureMechanismSectionsInvalid {
        list: list.name().to_string(),
        length: list.total_length(),
        expected: total_length,
    })
}

fn check_kind(list: &SectionList, required: SectionKind) -> Result<()> {
    let list_name = || list.name().to_string();
    match (required, list.kind()) {
        (_, SectionKind::Plain) => Err(AssemblyError::SectionsWithoutCategory { list: list_name() }),
        (SectionKind::Probability, SectionKind::Category) => {
            Err(AssemblyError::SectionsWithoutProbability { list: list_name() })
        }
        _ => Ok(()),
    }
}

/// Check that translated lists carry categories on one shared grid; returns
/// the first list
fn check_grid(translated: &[SectionList]) -> Result<&SectionList> {
    let Some(first) = translated.first() else {
        return Err(AssemblyError::EmptyInput {
            entity: "common sections".to_string(),
        });
    };

    let tolerance = Tolerance::LENGTH;
    let mut errors = ErrorCollector::new();
    for list in translated {
        errors.collect(check_kind(list, SectionKind::Category));
        let mismatch = list
            .iter()
            .zip(first.iter())
            .position(|(a, b)| {
                !tolerance.approx_eq(a.start(), b.start()) || !tolerance.approx_eq(a.end(), b.end())
            })
            .or_else(|| (list.len() != first.len()).then(|| list.len().min(first.len())));
        if let Some(index) = mismatch {
            errors.push(AssemblyError::CommonSectionsMismatch {
                list: list.name().to_string(),
                index,
            });
        }
    }
    errors.finish_with(first)
}

/// Position in one list during the sweep, ordered so the smallest section
/// end sits on top of a [`BinaryHeap`]
#[derive(Debug, Clone, Copy)]
struct Cursor {
    end: f64,
    list: usize,
    index: usize,
}

impl Cursor {
    fn first(lists: &[SectionList], list: usize) -> Option<Self> {
        Self::at(lists, list, 0)
    }

    fn at(lists: &[SectionList], list: usize, index: usize) -> Option<Self> {
        lists[list].sections().get(index).map(|section| Self {
            end: section.end(),
            list,
            index,
        })
    }

    fn advance(self, lists: &[SectionList]) -> Option<Self> {
        Self::at(lists, self.list, self.index + 1)
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cursor {}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .end
            .total_cmp(&self.end)
            .then_with(|| other.list.cmp(&self.list))
    }
}

/// Sweep all lists with one cursor each, emitting a common section at every
/// distinct breakpoint
///
/// The cursors live in a min-heap on their section end, so each of the `K`
/// input sections is pushed and popped once: `O(K log M)` for `M` lists.
fn sweep(lists: &[SectionList], total_length: f64) -> Result<SectionList> {
    let tolerance = Tolerance::LENGTH;
    let mut heap: BinaryHeap<Cursor> = (0..lists.len())
        .filter_map(|list| Cursor::first(lists, list))
        .collect();
    let mut sections = Vec::new();
    let mut start = 0.0;

    while let Some(cursor) = heap.pop() {
        let next = cursor.end;
        heap.extend(cursor.advance(lists));
        while heap
            .peek()
            .is_some_and(|cursor| tolerance.less_or_approx(cursor.end, next))
        {
            if let Some(cursor) = heap.pop() {
                heap.extend(cursor.advance(lists));
            }
        }

        let end = if tolerance.approx_eq(next, total_length) {
            total_length
        } else {
            next
        };
        if tolerance.definitely_less(start, end) {
            sections.push(Section::plain(start, end)?);
            start = end;
        }
    }

    SectionList::new(COMMON_SECTIONS, sections)
}

/// Midpoint containment with a monotone cursor
fn translate(list: &SectionList, common_sections: &SectionList) -> Result<SectionList> {
    let sources = list.sections();
    let mut cursor = 0;
    let sections = common_sections
        .iter()
        .map(|common| {
            let midpoint = common.midpoint();
            while cursor + 1 < sources.len() && sources[cursor].end() <= midpoint {
                cursor += 1;
            }
            Section::new(common.start(), common.end(), *sources[cursor].payload())
        })
        .collect::<Result<Vec<_>>>()?;
    SectionList::new(list.name(), sections)
}

/// Merged section if `previous` and `next` carry the same verdict
fn join(previous: &Section, next: &Section, negligible_difference: f64) -> Result<Option<Section>> {
    let payload = match (previous.payload(), next.payload()) {
        (SectionPayload::Plain, SectionPayload::Plain) => SectionPayload::Plain,
        (SectionPayload::Category { category: a }, SectionPayload::Category { category: b })
            if a == b =>
        {
            SectionPayload::Category { category: *a }
        }
        (
            SectionPayload::Probability {
                probability: p,
                category: a,
            },
            SectionPayload::Probability {
                probability: q,
                category: b,
            },
        ) if a == b && p.is_negligible_difference_within(*q, negligible_difference) => {
            let probability = if p.is_defined() { p.max(*q) } else { *p };
            SectionPayload::Probability {
                probability,
                category: *a,
            }
        }
        _ => return Ok(None),
    };
    Section::new(previous.start(), next.end(), payload).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assembly_domain::{ErrorKind, InterpretationCategory as Ic};

    fn categories(name: &str, bounds: &[(f64, f64, Ic)]) -> SectionList {
        let sections = bounds
            .iter()
            .map(|&(start, end, category)| Section::with_category(start, end, category).unwrap())
            .collect();
        SectionList::new(name, sections).unwrap()
    }

    fn probabilities(name: &str, bounds: &[(f64, f64, f64, Ic)]) -> SectionList {
        let sections = bounds
            .iter()
            .map(|&(start, end, p, category)| {
                Section::with_probability(start, end, Probability::new(p).unwrap(), category)
                    .unwrap()
            })
            .collect();
        SectionList::new(name, sections).unwrap()
    }

    fn verdicts(list: &SectionList) -> Vec<Ic> {
        list.iter().filter_map(Section::category).collect()
    }

    #[test]
    fn test_find_common_sections() {
        let a = categories("A", &[(0.0, 50.0, Ic::Zero), (50.0, 100.0, Ic::IMin)]);
        let b = categories("B", &[(0.0, 30.0, Ic::Zero), (30.0, 100.0, Ic::IMin)]);
        let common = CommonSectionAssembler::new()
            .find_common_sections(&[a, b], 100.0)
            .unwrap();
        assert_eq!(common.breakpoints(), vec![0.0, 30.0, 50.0, 100.0]);
        assert_eq!(common.kind(), SectionKind::Plain);
        assert_eq!(common.name(), COMMON_SECTIONS);
    }

    #[test]
    fn test_breakpoints_within_tolerance_collapse() {
        let a = categories("A", &[(0.0, 40.0, Ic::Zero), (40.0, 100.0, Ic::IMin)]);
        let b = categories(
            "B",
            &[(0.0, 40.000_000_001, Ic::Zero), (40.000_000_001, 100.0, Ic::IMin)],
        );
        let common = CommonSectionAssembler::new()
            .find_common_sections(&[a, b], 100.0)
            .unwrap();
        assert_eq!(common.len(), 2);
        assert_eq!(common.total_length(), 100.0);
    }

    #[test]
    fn test_last_breakpoint_snaps_to_total_length() {
        let a = categories("A", &[(0.0, 100.0, Ic::Zero)]);
        let b = categories("B", &[(0.0, 99.999_999_999, Ic::IMin)]);
        let common = CommonSectionAssembler::new()
            .find_common_sections(&[a, b], 100.0)
            .unwrap();
        assert_eq!(common.breakpoints(), vec![0.0, 100.0]);
    }

    #[test]
    fn test_translate_uses_midpoint_containment() {
        let list = categories("A", &[(0.0, 50.0, Ic::IPlus), (50.0, 100.0, Ic::IIMin)]);
        let common = SectionList::new(
            COMMON_SECTIONS,
            vec![
                Section::plain(0.0, 30.0).unwrap(),
                Section::plain(30.0, 50.0).unwrap(),
                Section::plain(50.0, 100.0).unwrap(),
            ],
        )
        .unwrap();
        let translated = CommonSectionAssembler::new()
            .translate_to_common_sections(&list, &common)
            .unwrap();
        assert_eq!(translated.name(), "A");
        assert_eq!(verdicts(&translated), vec![Ic::IPlus, Ic::IPlus, Ic::IIMin]);
    }

    #[test]
    fn test_translate_requires_categories() {
        let plain = SectionList::new("A", vec![Section::plain(0.0, 10.0).unwrap()]).unwrap();
        let error = CommonSectionAssembler::new()
            .translate_to_common_sections(&plain, &plain)
            .unwrap_err();
        assert_eq!(
            error,
            AssemblyError::SectionsWithoutCategory { list: "A".into() }
        );
    }

    #[test]
    fn test_worst_category_per_common_section() {
        let a = categories("A", &[(0.0, 60.0, Ic::IIIPlus), (60.0, 100.0, Ic::IIMin)]);
        let b = categories("B", &[(0.0, 20.0, Ic::IMin), (20.0, 100.0, Ic::NotDominant)]);
        let result = CommonSectionAssembler::new()
            .assemble(&[a, b], 100.0, AssemblyMode::Full)
            .unwrap();
        assert_eq!(verdicts(&result.combined), vec![Ic::IMin, Ic::IIIPlus, Ic::IIMin]);
        assert_eq!(result.translated.len(), 2);
        assert_eq!(result.combined.name(), COMBINED_SECTIONS);
    }

    #[test]
    fn test_dominant_outranks_probabilistic_categories() {
        let a = categories("A", &[(0.0, 10.0, Ic::IIIMin)]);
        let b = categories("B", &[(0.0, 10.0, Ic::Dominant)]);
        let result = CommonSectionAssembler::new()
            .assemble(&[a, b], 10.0, AssemblyMode::Full)
            .unwrap();
        assert_eq!(verdicts(&result.combined), vec![Ic::Dominant]);
    }

    #[test]
    fn test_no_result_in_full_and_partial_mode() {
        let a = categories("A", &[(0.0, 50.0, Ic::NoResult), (50.0, 100.0, Ic::IPlus)]);
        let b = categories("B", &[(0.0, 50.0, Ic::Zero), (50.0, 100.0, Ic::NoResult)]);
        let c = categories("C", &[(0.0, 50.0, Ic::NoResult), (50.0, 100.0, Ic::NoResult)]);
        let assembler = CommonSectionAssembler::new();

        let full = assembler
            .assemble(&[a.clone(), b.clone()], 100.0, AssemblyMode::Full)
            .unwrap();
        assert_eq!(verdicts(&full.combined), vec![Ic::NoResult, Ic::NoResult]);

        let partial = assembler
            .assemble(&[a, b, c.clone()], 100.0, AssemblyMode::Partial)
            .unwrap();
        assert_eq!(verdicts(&partial.combined), vec![Ic::Zero, Ic::IPlus]);

        let nothing = assembler
            .assemble(&[c], 100.0, AssemblyMode::Partial)
            .unwrap();
        assert_eq!(verdicts(&nothing.combined), vec![Ic::NoResult, Ic::NoResult]);
    }

    #[test]
    fn test_unequal_lengths_rejected() {
        let a = categories("A", &[(0.0, 100.0, Ic::Zero)]);
        let b = categories("B", &[(0.0, 90.0, Ic::Zero)]);
        let error = CommonSectionAssembler::new()
            .assemble(&[a, b], 100.0, AssemblyMode::Full)
            .unwrap_err();
        assert_eq!(
            error,
            AssemblyError::CommonFailureMechanismSectionsInvalid {
                list: "B".into(),
                length: 90.0,
                expected: 100.0,
            }
        );
    }

    #[test]
    fn test_all_defects_reported_up_front() {
        let plain = SectionList::new("A", vec![Section::plain(0.0, 100.0).unwrap()]).unwrap();
        let short = categories("B", &[(0.0, 90.0, Ic::Zero)]);
        let error = CommonSectionAssembler::new()
            .assemble(&[plain, short], 100.0, AssemblyMode::Full)
            .unwrap_err();
        assert_eq!(error.errors().len(), 2);
        assert!(error.has_kind(ErrorKind::Consistency));
    }

    #[test]
    fn test_empty_list_set_rejected() {
        let assembler = CommonSectionAssembler::new();
        let error = assembler.assemble(&[], 100.0, AssemblyMode::Full).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::EmptyInput);
        let error = assembler
            .determine_combined_result_per_common_section(&[], AssemblyMode::Full)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn test_combine_requires_shared_grid() {
        let a = categories("A", &[(0.0, 50.0, Ic::Zero), (50.0, 100.0, Ic::IMin)]);
        let b = categories("B", &[(0.0, 30.0, Ic::Zero), (30.0, 100.0, Ic::IMin)]);
        let error = CommonSectionAssembler::new()
            .determine_combined_result_per_common_section(&[a, b], AssemblyMode::Full)
            .unwrap_err();
        assert_eq!(
            error,
            AssemblyError::CommonSectionsMismatch {
                list: "B".into(),
                index: 0
            }
        );
    }

    #[test]
    fn test_combine_probabilities() {
        let a = probabilities("A", &[(0.0, 40.0, 0.1, Ic::IMin), (40.0, 100.0, 0.2, Ic::IIMin)]);
        let b = probabilities("B", &[(0.0, 100.0, 0.5, Ic::IIIMin)]);
        let combined = CommonSectionAssembler::new()
            .combine_probabilities_per_common_section(&[a, b], 100.0, AssemblyMode::Full)
            .unwrap();
        let values: Vec<f64> = combined
            .iter()
            .filter_map(|s| s.probability())
            .map(Probability::value)
            .collect();
        assert_eq!(values.len(), 2);
        assert!((values[0] - 0.55).abs() < 1e-12);
        assert!((values[1] - 0.6).abs() < 1e-12);
        assert_eq!(verdicts(&combined), vec![Ic::IIIMin, Ic::IIIMin]);
    }

    #[test]
    fn test_combine_probabilities_partial_skips_undefined() {
        let a = probabilities("A", &[(0.0, 100.0, 0.1, Ic::IMin)]);
        let b = SectionList::new(
            "B",
            vec![Section::with_probability(0.0, 100.0, Probability::UNDEFINED, Ic::NoResult).unwrap()],
        )
        .unwrap();
        let assembler = CommonSectionAssembler::new();

        let partial = assembler
            .combine_probabilities_per_common_section(&[a.clone(), b.clone()], 100.0, AssemblyMode::Partial)
            .unwrap();
        assert_eq!(partial.sections()[0].probability().map(Probability::value), Some(0.1));
        assert_eq!(partial.sections()[0].category(), Some(Ic::IMin));

        let full = assembler
            .combine_probabilities_per_common_section(&[a, b], 100.0, AssemblyMode::Full)
            .unwrap();
        assert!(!full.sections()[0].probability().is_some_and(Probability::is_defined));
        assert_eq!(full.sections()[0].category(), Some(Ic::NoResult));
    }

    #[test]
    fn test_combine_probabilities_requires_probabilities() {
        let a = categories("A", &[(0.0, 100.0, Ic::Zero)]);
        let error = CommonSectionAssembler::new()
            .combine_probabilities_per_common_section(&[a], 100.0, AssemblyMode::Full)
            .unwrap_err();
        assert_eq!(
            error,
            AssemblyError::SectionsWithoutProbability { list: "A".into() }
        );
    }

    #[test]
    fn test_merge_equal_adjacent_categories() {
        let list = categories(
            COMBINED_SECTIONS,
            &[
                (0.0, 10.0, Ic::Zero),
                (10.0, 25.0, Ic::Zero),
                (25.0, 40.0, Ic::IMin),
                (40.0, 100.0, Ic::Zero),
            ],
        );
        let merged = CommonSectionAssembler::new().merge_equal_adjacent(&list, 1e-6).unwrap();
        assert_eq!(merged.breakpoints(), vec![0.0, 25.0, 40.0, 100.0]);
        assert_eq!(verdicts(&merged), vec![Ic::Zero, Ic::IMin, Ic::Zero]);
        assert_eq!(merged.total_length(), list.total_length());
    }

    #[test]
    fn test_merge_equal_adjacent_probabilities() {
        let list = probabilities(
            COMBINED_SECTIONS,
            &[
                (0.0, 10.0, 1e-4, Ic::IMin),
                (10.0, 20.0, 1e-4 * (1.0 + 1e-9), Ic::IMin),
                (20.0, 30.0, 2e-4, Ic::IMin),
            ],
        );
        let merged = CommonSectionAssembler::new().merge_equal_adjacent(&list, 1e-6).unwrap();
        assert_eq!(merged.breakpoints(), vec![0.0, 20.0, 30.0]);
        let first = merged.sections()[0].probability().unwrap();
        assert_eq!(first.value(), 1e-4 * (1.0 + 1e-9));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const LENGTH: f64 = 1000.0;

    /// A category-bearing list over `[0, LENGTH]` with random interior breakpoints
    fn section_list(name: &'static str) -> impl Strategy<Value = SectionList> {
        (
            prop::collection::btree_set(1u32..1000, 0..25),
            prop::collection::vec(0usize..InterpretationCategory::ALL.len(), 26),
        )
            .prop_map(move |(cuts, picks)| {
                let bounds: Vec<f64> = std::iter::once(0.0)
                    .chain(cuts.into_iter().map(f64::from))
                    .chain(std::iter::once(LENGTH))
                    .collect();
                let sections = bounds
                    .windows(2)
                    .zip(picks)
                    .map(|(w, pick)| {
                        Section::with_category(w[0], w[1], InterpretationCategory::ALL[pick]).unwrap()
                    })
                    .collect();
                SectionList::new(name, sections).unwrap()
            })
    }

    proptest! {
        /// Property: the refinement conserves length and contains every breakpoint
        #[test]
        fn test_refinement_conserves_length(
            a in section_list("A"),
            b in section_list("B"),
            c in section_list("C"),
        ) {
            let lists = [a, b, c];
            let result = CommonSectionAssembler::new()
                .assemble(&lists, LENGTH, AssemblyMode::Full)
                .unwrap();

            let covered: f64 = result.common_sections.iter().map(Section::length).sum();
            prop_assert!((covered - LENGTH).abs() < 1e-6);
            let breakpoints = result.common_sections.breakpoints();
            for list in &lists {
                for point in list.breakpoints() {
                    prop_assert!(breakpoints.iter().any(|b| (b - point).abs() < 1e-8));
                }
            }
            prop_assert_eq!(result.combined.len(), result.common_sections.len());
        }

        /// Property: the refinement of many lists is exactly the union of their breakpoints
        #[test]
        fn test_refinement_is_breakpoint_union(
            lists in prop::collection::vec(section_list("M"), 1..16),
        ) {
            let common = CommonSectionAssembler::new()
                .find_common_sections(&lists, LENGTH)
                .unwrap();
            let mut expected: Vec<f64> = lists.iter().flat_map(SectionList::breakpoints).collect();
            expected.sort_by(f64::total_cmp);
            expected.dedup();
            prop_assert_eq!(common.breakpoints(), expected);
        }

        /// Property: each combined verdict is at least as bad as every input
        #[test]
        fn test_combined_is_worst_case(
            a in section_list("A"),
            b in section_list("B"),
        ) {
            let lists = [a, b];
            let result = CommonSectionAssembler::new()
                .assemble(&lists, LENGTH, AssemblyMode::Full)
                .unwrap();
            for combined in result.combined.iter() {
                let verdict = combined.category().unwrap();
                for list in &lists {
                    let input = list.category_at(combined.midpoint()).unwrap();
                    prop_assert!(verdict >= input);
                    prop_assert!(lists.iter().any(|l| l.category_at(combined.midpoint()) == Some(verdict)));
                }
            }
        }

        /// Property: merging adjacent sections conserves length
        #[test]
        fn test_merge_conserves_length(a in section_list("A")) {
            let merged = CommonSectionAssembler::new().merge_equal_adjacent(&a, 1e-6).unwrap();
            prop_assert!(merged.len() <= a.len());
            prop_assert_eq!(merged.total_length(), a.total_length());
            for pair in merged.sections().windows(2) {
                prop_assert_ne!(pair[0].category(), pair[1].category());
            }
        }
    }
}
