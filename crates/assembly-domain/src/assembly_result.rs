//! Results of failure mechanism and assessment section assembly

use crate::{AssessmentGrade, FailureMechanismCategory, Probability};
use serde::{Deserialize, Serialize};

/// Combination rule that produced an assembled probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyMethod {
    /// Independent-event union of the parts
    Independent,
    /// Fully correlated sections: largest profile probability times the
    /// mechanism length-effect factor
    Correlated,
    /// No judgement possible; the probability is undefined
    NoJudgement,
}

/// Assembled probability of a failure mechanism and the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyResult {
    probability: Probability,
    method: AssemblyMethod,
}

impl AssemblyResult {
    /// Result of a successful combination
    pub fn new(probability: Probability, method: AssemblyMethod) -> Self {
        Self {
            probability,
            method,
        }
    }

    /// Terminal "no judgement possible" result
    pub fn no_judgement() -> Self {
        Self::new(Probability::UNDEFINED, AssemblyMethod::NoJudgement)
    }

    /// Assembled probability; undefined without judgement
    pub fn probability(&self) -> Probability {
        self.probability
    }

    /// Combination rule used
    pub fn method(&self) -> AssemblyMethod {
        self.method
    }

    /// Whether a judgement was possible
    pub fn is_judged(&self) -> bool {
        self.method != AssemblyMethod::NoJudgement && self.probability.is_defined()
    }
}

/// Applicability and result of one failure mechanism for grade assembly
///
/// Deserialized outcomes pass through [`MechanismOutcome::assessed`], so an
/// `assessed` state without a probability reads as `not_assessed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case", from = "RawMechanismOutcome")]
pub enum MechanismOutcome {
    /// Assembled probability available
    Assessed {
        /// Mechanism probability
        probability: Probability,
    },
    /// Mechanism does not apply to this assessment section
    NotApplicable,
    /// Mechanism has not been assessed yet
    NotAssessed,
}

impl MechanismOutcome {
    /// Assessed outcome; an undefined probability counts as not assessed
    pub fn assessed(probability: Probability) -> Self {
        if probability.is_defined() {
            Self::Assessed { probability }
        } else {
            Self::NotAssessed
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum RawMechanismOutcome {
    Assessed { probability: Probability },
    NotApplicable,
    NotAssessed,
}

impl From<RawMechanismOutcome> for MechanismOutcome {
    fn from(raw: RawMechanismOutcome) -> Self {
        match raw {
            RawMechanismOutcome::Assessed { probability } => Self::assessed(probability),
            RawMechanismOutcome::NotApplicable => Self::NotApplicable,
            RawMechanismOutcome::NotAssessed => Self::NotAssessed,
        }
    }
}

/// Input of the assessment grade assembly for one failure mechanism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMechanismProbability {
    /// Mechanism identifier
    pub mechanism: String,
    /// Its outcome
    pub outcome: MechanismOutcome,
}

impl FailureMechanismProbability {
    /// Assessed mechanism; an undefined probability counts as not assessed
    pub fn assessed(mechanism: impl Into<String>, probability: Probability) -> Self {
        Self {
            mechanism: mechanism.into(),
            outcome: MechanismOutcome::assessed(probability),
        }
    }

    /// Mechanism judged through failure mechanism assembly
    pub fn from_result(mechanism: impl Into<String>, result: &AssemblyResult) -> Self {
        Self::assessed(mechanism, result.probability())
    }

    /// Mechanism that does not apply
    pub fn not_applicable(mechanism: impl Into<String>) -> Self {
        Self {
            mechanism: mechanism.into(),
            outcome: MechanismOutcome::NotApplicable,
        }
    }

    /// Mechanism not assessed yet
    pub fn not_assessed(mechanism: impl Into<String>) -> Self {
        Self {
            mechanism: mechanism.into(),
            outcome: MechanismOutcome::NotAssessed,
        }
    }
}

/// Verdict of a whole assessment section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentGradeResult {
    probability: Probability,
    grade: AssessmentGrade,
}

impl AssessmentGradeResult {
    /// Combined probability with its grade
    pub fn new(probability: Probability, grade: AssessmentGrade) -> Self {
        Self { probability, grade }
    }

    /// Terminal "no judgement possible" verdict
    pub fn no_judgement() -> Self {
        Self::new(Probability::UNDEFINED, AssessmentGrade::NoResult)
    }

    /// Combined probability; undefined without judgement
    pub fn probability(&self) -> Probability {
        self.probability
    }

    /// The grade
    pub fn grade(&self) -> AssessmentGrade {
        self.grade
    }
}

/// Assembled failure mechanism with its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategorizedAssemblyResult {
    /// Assembled probability and method
    pub result: AssemblyResult,
    /// Category of the probability
    pub category: FailureMechanismCategory,
}
