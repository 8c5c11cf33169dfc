//! Assembly Kernel
//!
//! Turns partial engineering assessments of a dike trajectory into one
//! standardized safety verdict.
//!
//! # Overview
//!
//! The kernel is responsible for:
//! - **Failure mechanism assembly**: folding per-section probabilities into one
//!   mechanism probability, with or without length effect
//! - **Assessment grade assembly**: combining independent mechanisms into the
//!   probability and grade of the whole assessment section
//! - **Common sections**: merging the mechanisms' section lists into their
//!   finest common refinement with a worst-case verdict per section
//!
//! Every step is a pure function over validated value objects from
//! `assembly_domain`; category limits come from `assembly_categories`.
//!
//! # Usage
//!
//! ```
//! use assembly_domain::{
//!     AssessmentSection, FailureMechanismSectionResult, InterpretationCategory as Ic,
//!     Section, SectionList,
//! };
//! use assembly_kernel::{AssessmentSectionAssembler, FailureMechanismInput, KernelConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let section = AssessmentSection::new(1_000.0, 1.0 / 10_000.0, 1.0 / 3_000.0)?;
//! let piping = FailureMechanismInput::new(
//!     "STPH",
//!     Some(4.0),
//!     vec![
//!         FailureMechanismSectionResult::new("vak 1", 400.0, 2e-7, 6e-7)?,
//!         FailureMechanismSectionResult::new("vak 2", 600.0, 1e-6, 3e-6)?,
//!     ],
//!     SectionList::new(
//!         "STPH",
//!         vec![
//!             Section::with_category(0.0, 400.0, Ic::IPlus)?,
//!             Section::with_category(400.0, 1_000.0, Ic::Zero)?,
//!         ],
//!     )?,
//! );
//!
//! let assembler = AssessmentSectionAssembler::new(KernelConfig::partial())?;
//! let verdict = assembler.assemble(&section, &[piping])?;
//! println!("{} ({})", verdict.grade.grade(), verdict.grade.probability());
//! # Ok(())
//! # }
//! ```
//!
//! # Modes
//!
//! [`KernelConfig::mode`] is read once per run. In full mode any unassessed
//! input makes the affected result "no judgement possible"; in partial mode
//! unassessed inputs are left out.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assessment_grade;
pub mod common_sections;
pub mod config;
pub mod error;
pub mod failure_mechanism;
pub mod pipeline;

// Re-exports for convenience
pub use assessment_grade::AssessmentGradeAssembler;
pub use common_sections::{CommonSectionAssembler, CommonSectionsResult};
pub use config::KernelConfig;
pub use error::KernelError;
pub use failure_mechanism::FailureMechanismResultAssembler;
pub use pipeline::{
    AssessmentSectionAssembler, AssessmentSectionVerdict, FailureMechanismInput, MechanismVerdict,
};
