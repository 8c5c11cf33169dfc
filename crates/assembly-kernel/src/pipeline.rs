//! Assessment section pipeline
//!
//! Runs every assembly step for one assessment section with a single
//! [`KernelConfig`]:
//!
//! 1. derive the category lists from the norms
//! 2. assemble and classify each failure mechanism, checking the categories
//!    of probability-bearing sections against their probabilities
//! 3. combine the mechanisms into the assessment grade
//! 4. merge the mechanisms' section lists into common sections

use crate::assessment_grade::AssessmentGradeAssembler;
use crate::common_sections::{CommonSectionAssembler, CommonSectionsResult};
use crate::config::KernelConfig;
use crate::error::KernelError;
use crate::failure_mechanism::FailureMechanismResultAssembler;
use assembly_categories::CategoryLimitsCalculator;
use assembly_domain::{
    AssemblyError, AssessmentGradeResult, AssessmentSection, CategorizedAssemblyResult,
    ErrorCollector, FailureMechanismProbability, FailureMechanismSectionResult, SectionKind,
    SectionList,
};
use serde::{Deserialize, Serialize};

/// Everything known about one failure mechanism of an assessment section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMechanismInput {
    /// Mechanism identifier, e.g. `STPH`
    pub name: String,
    /// Mechanism length-effect factor `N`; `None` without length effect
    #[serde(default)]
    pub length_effect_factor: Option<f64>,
    /// Assessment result per section
    pub section_results: Vec<FailureMechanismSectionResult>,
    /// The mechanism's sections with their interpretation categories
    pub sections: SectionList,
}

impl FailureMechanismInput {
    /// Create the input of one mechanism
    pub fn new(
        name: impl Into<String>,
        length_effect_factor: Option<f64>,
        section_results: Vec<FailureMechanismSectionResult>,
        sections: SectionList,
    ) -> Self {
        Self {
            name: name.into(),
            length_effect_factor,
            section_results,
            sections,
        }
    }
}

/// Assembled and classified failure mechanism
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MechanismVerdict {
    /// Mechanism identifier
    pub name: String,
    /// Probability, method and category
    pub result: CategorizedAssemblyResult,
}

/// Complete verdict of an assessment section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSectionVerdict {
    /// One verdict per mechanism, in input order
    pub mechanisms: Vec<MechanismVerdict>,
    /// Combined probability and grade
    pub grade: AssessmentGradeResult,
    /// Common sections with translated and combined categories
    pub common_sections: CommonSectionsResult,
    /// Combined categories as reported; merged when configured
    pub reported_sections: SectionList,
    /// Union of the section probabilities per common section, when every
    /// mechanism provides probabilities
    pub combined_probabilities: Option<SectionList>,
}

/// Runs the full assembly of an assessment section
///
/// # Examples
///
/// ```
/// use assembly_domain::{
///     AssessmentGrade, AssessmentSection, FailureMechanismSectionResult,
///     InterpretationCategory, Section, SectionList,
/// };
/// use assembly_kernel::{AssessmentSectionAssembler, FailureMechanismInput, KernelConfig};
///
/// let section = AssessmentSection::new(100.0, 1.0 / 30_000.0, 1.0 / 10_000.0).unwrap();
/// let stph = FailureMechanismInput::new(
///     "STPH",
///     None,
///     vec![FailureMechanismSectionResult::with_section_probability("vak 1", 100.0, 1e-6).unwrap()],
///     SectionList::new(
///         "STPH",
///         vec![Section::with_category(0.0, 100.0, InterpretationCategory::IPlus).unwrap()],
///     )
///     .unwrap(),
/// );
///
/// let assembler = AssessmentSectionAssembler::new(KernelConfig::default()).unwrap();
/// let verdict = assembler.assemble(&section, &[stph]).unwrap();
/// assert_eq!(verdict.grade.grade(), AssessmentGrade::APlus);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssessmentSectionAssembler {
    config: KernelConfig,
    calculator: CategoryLimitsCalculator,
    mechanism_assembler: FailureMechanismResultAssembler,
    grade_assembler: AssessmentGradeAssembler,
    common_assembler: CommonSectionAssembler,
}

impl AssessmentSectionAssembler {
    /// Create a pipeline with a validated configuration
    pub fn new(config: KernelConfig) -> Result<Self, KernelError> {
        config.validate().map_err(KernelError::Config)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Assemble `mechanisms` of `section`
    ///
    /// All input errors of all mechanisms are reported together before any
    /// result is produced.
    pub fn assemble(
        &self,
        section: &AssessmentSection,
        mechanisms: &[FailureMechanismInput],
    ) -> Result<AssessmentSectionVerdict, KernelError> {
        let mode = self.config.mode;
        if mechanisms.is_empty() {
            return Err(AssemblyError::EmptyInput {
                entity: "assessment section".to_string(),
            }
            .into());
        }

        let mut errors = ErrorCollector::new();
        let verdicts: Vec<MechanismVerdict> = mechanisms
            .iter()
            .filter_map(|mechanism| errors.collect(self.assemble_mechanism(section, mechanism)))
            .collect();
        let lists: Vec<SectionList> = mechanisms.iter().map(|m| m.sections.clone()).collect();
        let common_sections = errors.collect(self.common_assembler.assemble(
            &lists,
            section.length(),
            mode,
        ));
        let common_sections = errors.finish_with(common_sections)?;
        let Some(common_sections) = common_sections else {
            return Err(AssemblyError::EmptyInput {
                entity: "common sections".to_string(),
            }
            .into());
        };

        let probabilities: Vec<FailureMechanismProbability> = verdicts
            .iter()
            .map(|v| FailureMechanismProbability::from_result(v.name.as_str(), &v.result.result))
            .collect();
        let grades = self.calculator.assessment_grade_categories(section)?;
        let grade = self.grade_assembler.assemble(&probabilities, mode, &grades)?;

        let combined_probabilities = if lists.iter().all(|l| l.kind() == SectionKind::Probability) {
            Some(self.common_assembler.combine_probabilities_per_common_section(
                &lists,
                section.length(),
                mode,
            )?)
        } else {
            None
        };

        let (reported_sections, combined_probabilities) = if self.config.merge_adjacent_common_sections {
            let tolerance = self.config.negligible_difference;
            let merged = self
                .common_assembler
                .merge_equal_adjacent(&common_sections.combined, tolerance)?;
            let probabilities = combined_probabilities
                .map(|list| self.common_assembler.merge_equal_adjacent(&list, tolerance))
                .transpose()?;
            (merged, probabilities)
        } else {
            (common_sections.combined.clone(), combined_probabilities)
        };

        tracing::info!(
            mechanisms = mechanisms.len(),
            probability = grade.probability().value(),
            grade = %grade.grade(),
            common_sections = common_sections.common_sections.len(),
            mode = mode.as_str(),
            "assembled assessment section"
        );

        Ok(AssessmentSectionVerdict {
            mechanisms: verdicts,
            grade,
            common_sections,
            reported_sections,
            combined_probabilities,
        })
    }

    fn assemble_mechanism(
        &self,
        section: &AssessmentSection,
        mechanism: &FailureMechanismInput,
    ) -> assembly_domain::Result<MechanismVerdict> {
        let result = self.mechanism_assembler.assemble(
            &mechanism.name,
            &mechanism.section_results,
            mechanism.length_effect_factor,
            self.config.mode,
        )?;
        let n = mechanism.length_effect_factor.unwrap_or(1.0);
        if mechanism.sections.kind() == SectionKind::Probability {
            let interpretation = self.calculator.interpretation_categories(section, n)?;
            self.mechanism_assembler
                .check_section_categories(&mechanism.sections, &interpretation)?;
        }
        let categories = self.calculator.failure_mechanism_categories(section, n)?;
        let result = self.mechanism_assembler.determine_category(result, &categories)?;
        Ok(MechanismVerdict {
            name: mechanism.name.clone(),
            result,
        })
    }
}
