//! Assessment grade assembly
//!
//! Combines the failure mechanism probabilities of an assessment section into
//! one probability and grades it.

use assembly_categories::CategoryLimitsCalculator;
use assembly_domain::{
    AssemblyError, AssemblyMode, AssessmentGrade, AssessmentGradeResult, AssessmentSection,
    CategoryList, FailureMechanismProbability, MechanismOutcome, Probability, Result,
};

/// Combines independent failure mechanisms into an assessment grade
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentGradeAssembler;

impl AssessmentGradeAssembler {
    /// Create an assembler
    pub fn new() -> Self {
        Self
    }

    /// Grade the mechanisms against the norms of `section`
    pub fn assemble_for_section(
        &self,
        mechanisms: &[FailureMechanismProbability],
        mode: AssemblyMode,
        section: &AssessmentSection,
    ) -> Result<AssessmentGradeResult> {
        let grades = CategoryLimitsCalculator::new().assessment_grade_categories(section)?;
        self.assemble(mechanisms, mode, &grades)
    }

    /// Union of all applicable mechanisms, looked up in `grades`
    ///
    /// Mechanisms that do not apply are skipped. An unassessed mechanism
    /// yields "no judgement possible" in full mode and is skipped in partial
    /// mode. When nothing applies the probability is 0.
    pub fn assemble(
        &self,
        mechanisms: &[FailureMechanismProbability],
        mode: AssemblyMode,
        grades: &CategoryList<AssessmentGrade>,
    ) -> Result<AssessmentGradeResult> {
        let Some(probability) = self.combine_probabilities(mechanisms, mode)? else {
            return Ok(AssessmentGradeResult::no_judgement());
        };
        let grade = grades.category_for(probability)?;
        tracing::debug!(
            mechanisms = mechanisms.len(),
            probability = probability.value(),
            %grade,
            "assembled assessment grade"
        );
        Ok(AssessmentGradeResult::new(probability, grade))
    }

    /// Combined probability of the mechanisms; `None` without judgement
    pub fn combine_probabilities(
        &self,
        mechanisms: &[FailureMechanismProbability],
        mode: AssemblyMode,
    ) -> Result<Option<Probability>> {
        if mechanisms.is_empty() {
            return Err(AssemblyError::EmptyInput {
                entity: "assessment section".to_string(),
            });
        }

        let mut assessed = Vec::with_capacity(mechanisms.len());
        let mut unassessed = Vec::new();
        for mechanism in mechanisms {
            match mechanism.outcome {
                MechanismOutcome::Assessed { probability } if probability.is_defined() => {
                    assessed.push(probability)
                }
                MechanismOutcome::Assessed { .. } | MechanismOutcome::NotAssessed => {
                    unassessed.push(mechanism.mechanism.as_str())
                }
                MechanismOutcome::NotApplicable => {}
            }
        }

        let partial_without_results = mode.is_partial() && assessed.is_empty();
        if !unassessed.is_empty() && (!mode.is_partial() || partial_without_results) {
            tracing::warn!(
                ?unassessed,
                mode = mode.as_str(),
                "no judgement possible for assessment section"
            );
            return Ok(None);
        }

        Ok(Some(Probability::union_all(assessed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assembly_domain::ErrorKind;

    fn section() -> AssessmentSection {
        AssessmentSection::new(10_000.0, 1.0 / 30_000.0, 1.0 / 10_000.0).unwrap()
    }

    fn assessed(name: &str, value: f64) -> FailureMechanismProbability {
        FailureMechanismProbability::assessed(name, Probability::new(value).unwrap())
    }

    fn grade(
        mechanisms: &[FailureMechanismProbability],
        mode: AssemblyMode,
    ) -> Result<AssessmentGradeResult> {
        AssessmentGradeAssembler::new().assemble_for_section(mechanisms, mode, &section())
    }

    #[test]
    fn test_union_of_mechanisms_is_graded() {
        let mechanisms = [assessed("STPH", 2e-5), assessed("GEKB", 3e-5)];
        let result = grade(&mechanisms, AssemblyMode::Full).unwrap();
        assert!((result.probability().value() - (5e-5 - 6e-10)).abs() < 1e-15);
        assert_eq!(result.grade(), AssessmentGrade::B);
    }

    #[test]
    fn test_not_applicable_mechanisms_are_skipped() {
        let mechanisms = [
            assessed("STPH", 1e-6),
            FailureMechanismProbability::not_applicable("DA"),
        ];
        let result = grade(&mechanisms, AssemblyMode::Full).unwrap();
        assert_eq!(result.probability().value(), 1e-6);
        assert_eq!(result.grade(), AssessmentGrade::APlus);
    }

    #[test]
    fn test_all_not_applicable_is_best_grade() {
        let mechanisms = [
            FailureMechanismProbability::not_applicable("DA"),
            FailureMechanismProbability::not_applicable("HTKW"),
        ];
        let result = grade(&mechanisms, AssemblyMode::Full).unwrap();
        assert_eq!(result.probability(), Probability::ZERO);
        assert_eq!(result.grade(), AssessmentGrade::APlus);
    }

    #[test]
    fn test_full_mode_unassessed_has_no_judgement() {
        let mechanisms = [
            assessed("STPH", 1e-6),
            FailureMechanismProbability::not_assessed("GEKB"),
        ];
        let result = grade(&mechanisms, AssemblyMode::Full).unwrap();
        assert_eq!(result.grade(), AssessmentGrade::NoResult);
        assert!(!result.probability().is_defined());
    }

    #[test]
    fn test_partial_mode_skips_unassessed() {
        let mechanisms = [
            assessed("STPH", 1e-3),
            FailureMechanismProbability::not_assessed("GEKB"),
        ];
        let result = grade(&mechanisms, AssemblyMode::Partial).unwrap();
        assert_eq!(result.grade(), AssessmentGrade::C);
    }

    #[test]
    fn test_partial_mode_without_any_result_has_no_judgement() {
        let mechanisms = [
            FailureMechanismProbability::not_assessed("STPH"),
            FailureMechanismProbability::not_applicable("DA"),
        ];
        let result = grade(&mechanisms, AssemblyMode::Partial).unwrap();
        assert_eq!(result, AssessmentGradeResult::no_judgement());
    }

    #[test]
    fn test_assessed_without_probability_has_no_judgement() {
        let json = r#"[
            {"mechanism": "STPH", "outcome": {"state": "assessed", "probability": 1e-6}},
            {"mechanism": "GEKB", "outcome": {"state": "assessed", "probability": null}}
        ]"#;
        let mechanisms: Vec<FailureMechanismProbability> = serde_json::from_str(json).unwrap();
        let result = grade(&mechanisms, AssemblyMode::Full).unwrap();
        assert_eq!(result, AssessmentGradeResult::no_judgement());

        let built = [
            assessed("STPH", 1e-3),
            FailureMechanismProbability {
                mechanism: "GEKB".into(),
                outcome: MechanismOutcome::Assessed {
                    probability: Probability::UNDEFINED,
                },
            },
        ];
        assert_eq!(grade(&built, AssemblyMode::Full).unwrap().grade(), AssessmentGrade::NoResult);
        assert_eq!(grade(&built, AssemblyMode::Partial).unwrap().grade(), AssessmentGrade::C);
    }

    #[test]
    fn test_empty_mechanism_list_rejected() {
        let error = grade(&[], AssemblyMode::Full).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn test_boundary_probability_takes_better_grade() {
        let mechanisms = [assessed("STPH", 1.0 / 30_000.0)];
        let result = grade(&mechanisms, AssemblyMode::Full).unwrap();
        assert_eq!(result.grade(), AssessmentGrade::A);
    }
}
