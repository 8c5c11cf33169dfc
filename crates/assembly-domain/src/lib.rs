//! Assembly Domain Layer
//!
//! Value objects shared by every assembly step of the flood-defense safety
//! verdict. Nothing in this crate performs I/O; everything is validated at
//! construction and immutable afterwards.
//!
//! ## Key Concepts
//!
//! - **Probability**: a failure probability in [0, 1] or explicitly undefined
//! - **Category list**: a gapless partition of [0, 1] into ranked categories
//! - **Section list**: a contiguous partition of the assessment section
//!   length, one per failure mechanism
//! - **Assessment section**: the dike trajectory with its two regulatory norms
//! - **Assembly mode**: full or partial treatment of unassessed inputs
//!
//! ## Errors
//!
//! Every fallible constructor returns [`Result`] with an [`AssemblyError`]
//! naming the offending entity. Validation reports all defects it finds.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembly_result;
pub mod assessment_grade;
pub mod assessment_section;
pub mod category;
pub mod error;
pub mod interpretation_category;
pub mod mechanism_category;
pub mod mode;
pub mod probability;
pub mod section;
pub mod section_result;
pub mod statistics;
pub mod tolerance;

// Re-exports for convenience
pub use assembly_result::{
    AssemblyMethod, AssemblyResult, AssessmentGradeResult, CategorizedAssemblyResult,
    FailureMechanismProbability, MechanismOutcome,
};
pub use assessment_grade::AssessmentGrade;
pub use assessment_section::AssessmentSection;
pub use category::{Category, CategoryKind, CategoryList};
pub use error::{AssemblyError, ErrorCollector, ErrorKind, Result};
pub use interpretation_category::InterpretationCategory;
pub use mechanism_category::FailureMechanismCategory;
pub use mode::AssemblyMode;
pub use probability::Probability;
pub use section::{Section, SectionKind, SectionList, SectionPayload};
pub use section_result::FailureMechanismSectionResult;
pub use tolerance::Tolerance;
