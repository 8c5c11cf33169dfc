//! Failure mechanism assembly
//!
//! Folds the section results of one failure mechanism into a single
//! mechanism probability and classifies it.

use assembly_domain::{
    AssemblyError, AssemblyMethod, AssemblyMode, AssemblyResult, CategorizedAssemblyResult,
    CategoryList, ErrorCollector, FailureMechanismCategory, FailureMechanismSectionResult,
    InterpretationCategory, Probability, Result, SectionList,
};

/// Combines per-section probabilities into one mechanism probability
///
/// Without a length effect the sections are treated as independent and
/// combined by their union. With a mechanism length-effect factor `N` the
/// fully correlated estimate `max(p_profile) · N` is computed as well and the
/// smaller estimate wins.
///
/// # Examples
///
/// ```
/// use assembly_domain::{AssemblyMethod, AssemblyMode, FailureMechanismSectionResult};
/// use assembly_kernel::FailureMechanismResultAssembler;
///
/// let sections = vec![
///     FailureMechanismSectionResult::new("vak 1", 100.0, 1e-5, 2e-5).unwrap(),
///     FailureMechanismSectionResult::new("vak 2", 100.0, 2e-5, 4e-5).unwrap(),
/// ];
/// let result = FailureMechanismResultAssembler::new()
///     .assemble("STPH", &sections, Some(2.0), AssemblyMode::Full)
///     .unwrap();
///
/// assert_eq!(result.method(), AssemblyMethod::Correlated);
/// assert!((result.probability().value() - 4e-5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureMechanismResultAssembler;

impl FailureMechanismResultAssembler {
    /// Create an assembler
    pub fn new() -> Self {
        Self
    }

    /// Assemble the section results of `mechanism`
    ///
    /// Unassessed sections make the result "no judgement possible" in full
    /// mode and are skipped in partial mode. Fails with `EmptyInput` when
    /// there are no section results.
    pub fn assemble(
        &self,
        mechanism: &str,
        section_results: &[FailureMechanismSectionResult],
        length_effect_factor: Option<f64>,
        mode: AssemblyMode,
    ) -> Result<AssemblyResult> {
        if section_results.is_empty() {
            return Err(AssemblyError::EmptyInput {
                entity: mechanism.to_string(),
            });
        }
        if let Some(n) = length_effect_factor {
            if !n.is_finite() || n < 1.0 {
                return Err(AssemblyError::LengthEffectFactorOutOfRange {
                    entity: mechanism.to_string(),
                    value: n,
                });
            }
        }

        let assessed: Vec<&FailureMechanismSectionResult> =
            section_results.iter().filter(|r| r.is_assessed()).collect();
        let unassessed = section_results.len() - assessed.len();

        if assessed.is_empty() || (unassessed > 0 && !mode.is_partial()) {
            tracing::warn!(
                mechanism,
                unassessed,
                mode = mode.as_str(),
                "no judgement possible for failure mechanism"
            );
            return Ok(AssemblyResult::no_judgement());
        }

        let independent = Probability::union_all(assessed.iter().map(|r| r.probability_section()));
        let result = match length_effect_factor {
            None => AssemblyResult::new(independent, AssemblyMethod::Independent),
            Some(n) => {
                let correlated = assessed
                    .iter()
                    .map(|r| r.probability_section().divide_by(r.n_section()))
                    .fold(Probability::ZERO, Probability::max)
                    .scale(n);
                if correlated < independent {
                    AssemblyResult::new(correlated, AssemblyMethod::Correlated)
                } else {
                    AssemblyResult::new(independent, AssemblyMethod::Independent)
                }
            }
        };

        tracing::debug!(
            mechanism,
            sections = section_results.len(),
            skipped = unassessed,
            method = ?result.method(),
            probability = result.probability().value(),
            "assembled failure mechanism"
        );
        Ok(result)
    }

    /// Classify an assembled mechanism probability
    ///
    /// A result without judgement maps to [`FailureMechanismCategory::NoResult`].
    pub fn determine_category(
        &self,
        result: AssemblyResult,
        categories: &CategoryList<FailureMechanismCategory>,
    ) -> Result<CategorizedAssemblyResult> {
        let category = if result.is_judged() {
            categories.category_for(result.probability())?
        } else {
            FailureMechanismCategory::NoResult
        };
        Ok(CategorizedAssemblyResult { result, category })
    }

    /// Interpretation category of a mechanism section from its probability
    ///
    /// An undefined probability maps to [`InterpretationCategory::NoResult`].
    pub fn determine_interpretation_category(
        &self,
        probability: Probability,
        categories: &CategoryList<InterpretationCategory>,
    ) -> Result<InterpretationCategory> {
        if probability.is_defined() {
            categories.category_for(probability)
        } else {
            Ok(InterpretationCategory::NoResult)
        }
    }

    /// Check every probability-bearing section of `sections` against the
    /// category derived from its probability
    ///
    /// A probability on a category boundary is consistent with both adjacent
    /// categories. A section without a defined probability may only carry a
    /// non-probabilistic category. Lists without probabilities pass
    /// unchecked; all inconsistent sections are reported together.
    pub fn check_section_categories(
        &self,
        sections: &SectionList,
        categories: &CategoryList<InterpretationCategory>,
    ) -> Result<()> {
        let mut errors = ErrorCollector::new();
        for (index, section) in sections.iter().enumerate() {
            let (Some(probability), Some(found)) = (section.probability(), section.category()) else {
                continue;
            };
            let consistent = if probability.is_defined() {
                categories
                    .iter()
                    .any(|c| c.category() == found && c.contains(probability))
            } else {
                !InterpretationCategory::PROBABILISTIC.contains(&found)
            };
            if consistent {
                continue;
            }
            let Some(expected) =
                errors.collect(self.determine_interpretation_category(probability, categories))
            else {
                continue;
            };
            errors.push(AssemblyError::SectionCategoryInconsistent {
                list: sections.name().to_string(),
                index,
                found: found.to_string(),
                expected: expected.to_string(),
                probability: probability.value(),
            });
        }
        if !errors.is_empty() {
            tracing::warn!(
                list = sections.name(),
                inconsistent = errors.len(),
                "section categories contradict their probabilities"
            );
        }
        errors.finish()
    }
}
