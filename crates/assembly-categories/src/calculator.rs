//! Category limits derived from the regulatory norms

use assembly_domain::assessment_section::validate_norms;
use assembly_domain::{
    AssemblyError, AssessmentGrade, AssessmentSection, Category, CategoryKind, CategoryList,
    ErrorCollector, FailureMechanismCategory, InterpretationCategory, Probability, Result,
};

/// Derives category lists from the signal probability `Ps`, the maximum
/// allowable probability `Pmax` and a length-effect factor `N`
///
/// Every boundary is a fixed multiple of a norm. Boundaries above 1 are
/// clamped to 1, which leaves zero-width categories at the top. Every list is
/// validated by [`CategoryList::new`] before it is returned.
///
/// # Examples
///
/// ```
/// use assembly_categories::CategoryLimitsCalculator;
/// use assembly_domain::{AssessmentGrade, AssessmentSection, Probability};
///
/// let section = AssessmentSection::new(10_000.0, 1.0 / 30_000.0, 1.0 / 10_000.0).unwrap();
/// let calculator = CategoryLimitsCalculator::new();
/// let grades = calculator.assessment_grade_categories(&section).unwrap();
///
/// let grade = grades.category_for(Probability::new(5e-5).unwrap()).unwrap();
/// assert_eq!(grade, AssessmentGrade::B);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryLimitsCalculator;

impl CategoryLimitsCalculator {
    /// Create a calculator
    pub fn new() -> Self {
        Self
    }

    /// Assessment grades of an assessment section
    pub fn assessment_grade_categories(
        &self,
        section: &AssessmentSection,
    ) -> Result<CategoryList<AssessmentGrade>> {
        self.assessment_grade_categories_for_norms(
            section.signal_probability(),
            section.maximum_allowable_probability(),
        )
    }

    /// Assessment grades: `A+ ≤ Ps/30 < A ≤ Ps < B ≤ Pmax < C ≤ 30·Pmax < D`
    pub fn assessment_grade_categories_for_norms(
        &self,
        signal: Probability,
        maximum: Probability,
    ) -> Result<CategoryList<AssessmentGrade>> {
        validate_norms(signal, maximum)?;
        let list = build_list(&[
            (AssessmentGrade::APlus, signal.divide_by(30.0)),
            (AssessmentGrade::A, signal),
            (AssessmentGrade::B, maximum),
            (AssessmentGrade::C, maximum.scale(30.0)),
            (AssessmentGrade::D, Probability::ONE),
        ])?;
        tracing::debug!(
            signal = signal.value(),
            maximum = maximum.value(),
            "derived assessment grade limits"
        );
        Ok(list)
    }

    /// Failure mechanism categories of an assessment section
    pub fn failure_mechanism_categories(
        &self,
        section: &AssessmentSection,
        length_effect_factor: f64,
    ) -> Result<CategoryList<FailureMechanismCategory>> {
        self.failure_mechanism_categories_for_norms(
            section.signal_probability(),
            section.maximum_allowable_probability(),
            length_effect_factor,
        )
    }

    /// Failure mechanism categories:
    /// `It ≤ Ps/(30N) < IIt ≤ Ps/N < IIIt ≤ Pmax/N < IVt ≤ Pmax < Vt ≤ 30·Pmax < VIt`
    pub fn failure_mechanism_categories_for_norms(
        &self,
        signal: Probability,
        maximum: Probability,
        length_effect_factor: f64,
    ) -> Result<CategoryList<FailureMechanismCategory>> {
        validate_inputs(signal, maximum, length_effect_factor)?;
        let n = length_effect_factor;
        let list = build_list(&[
            (FailureMechanismCategory::It, signal.divide_by(30.0 * n)),
            (FailureMechanismCategory::IIt, signal.divide_by(n)),
            (FailureMechanismCategory::IIIt, maximum.divide_by(n)),
            (FailureMechanismCategory::IVt, maximum),
            (FailureMechanismCategory::Vt, maximum.scale(30.0)),
            (FailureMechanismCategory::VIt, Probability::ONE),
        ])?;
        tracing::debug!(
            signal = signal.value(),
            maximum = maximum.value(),
            length_effect_factor = n,
            "derived failure mechanism category limits"
        );
        Ok(list)
    }

    /// Interpretation categories of failure mechanism sections
    pub fn interpretation_categories(
        &self,
        section: &AssessmentSection,
        length_effect_factor: f64,
    ) -> Result<CategoryList<InterpretationCategory>> {
        self.interpretation_categories_for_norms(
            section.signal_probability(),
            section.maximum_allowable_probability(),
            length_effect_factor,
        )
    }

    /// Interpretation categories with limits `Ps/(1000N)`, `Ps/(100N)`,
    /// `Ps/(10N)`, `Ps/N`, `Pmax/N` and `10·Pmax/N`
    pub fn interpretation_categories_for_norms(
        &self,
        signal: Probability,
        maximum: Probability,
        length_effect_factor: f64,
    ) -> Result<CategoryList<InterpretationCategory>> {
        validate_inputs(signal, maximum, length_effect_factor)?;
        let n = length_effect_factor;
        let list = build_list(&[
            (InterpretationCategory::IIIPlus, signal.divide_by(1000.0 * n)),
            (InterpretationCategory::IIPlus, signal.divide_by(100.0 * n)),
            (InterpretationCategory::IPlus, signal.divide_by(10.0 * n)),
            (InterpretationCategory::Zero, signal.divide_by(n)),
            (InterpretationCategory::IMin, maximum.divide_by(n)),
            (InterpretationCategory::IIMin, maximum.scale(10.0 / n)),
            (InterpretationCategory::IIIMin, Probability::ONE),
        ])?;
        tracing::debug!(
            signal = signal.value(),
            maximum = maximum.value(),
            length_effect_factor = n,
            "derived interpretation category limits"
        );
        Ok(list)
    }
}

fn validate_inputs(signal: Probability, maximum: Probability, length_effect_factor: f64) -> Result<()> {
    let mut errors = ErrorCollector::new();
    errors.collect(validate_norms(signal, maximum));
    if !length_effect_factor.is_finite() || length_effect_factor < 1.0 {
        errors.push(AssemblyError::LengthEffectFactorOutOfRange {
            entity: "category limits".to_string(),
            value: length_effect_factor,
        });
    }
    errors.finish()
}

/// Chain `(category, upper limit)` pairs into a list starting at 0
fn build_list<T: CategoryKind>(uppers: &[(T, Probability)]) -> Result<CategoryList<T>> {
    let mut lower = Probability::ZERO;
    let mut categories = Vec::with_capacity(uppers.len());
    for &(category, upper) in uppers {
        categories.push(Category::new(category, lower, upper)?);
        lower = upper;
    }
    CategoryList::new(categories)
}
