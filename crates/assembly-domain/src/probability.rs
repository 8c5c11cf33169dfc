//! Bounded probability value type

use crate::error::{AssemblyError, Result};
use crate::statistics;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Relative reliability-index difference below which two probabilities are
/// considered the same
pub const DEFAULT_NEGLIGIBLE_DIFFERENCE: f64 = 1e-6;

/// A failure probability in [0, 1], or [`Probability::UNDEFINED`]
///
/// The only ways to obtain a value are the validated [`Probability::new`],
/// the constants, and the combinators below, which keep results inside
/// [0, 1]. Undefined propagates through every combinator.
///
/// # Examples
///
/// ```
/// use assembly_domain::Probability;
///
/// let p = Probability::new(1e-4).unwrap();
/// let q = Probability::new(2e-4).unwrap();
/// let union = p.union(q);
/// assert!((union.value() - 2.9998e-4).abs() < 1e-12);
/// assert!(Probability::new(1.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Option<f64>", into = "Option<f64>")]
pub struct Probability(f64);

impl Probability {
    /// Sentinel for "no probability available"
    pub const UNDEFINED: Probability = Probability(f64::NAN);

    /// Impossible event
    pub const ZERO: Probability = Probability(0.0);

    /// Certain event
    pub const ONE: Probability = Probability(1.0);

    /// Validate a raw value; NaN maps to [`Probability::UNDEFINED`]
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Ok(Self::UNDEFINED);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(AssemblyError::ProbabilityOutOfRange { value });
        }
        Ok(Self(value))
    }

    fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self::UNDEFINED
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Probability belonging to a reliability index `β`
    pub fn from_reliability(reliability: f64) -> Self {
        Self::clamped(statistics::reliability_to_probability(reliability))
    }

    /// Raw value (NaN when undefined)
    pub fn value(self) -> f64 {
        self.0
    }

    /// Raw value, or `UndefinedProbability` naming `context`
    pub fn defined_value(self, context: &str) -> Result<f64> {
        if self.is_defined() {
            Ok(self.0)
        } else {
            Err(AssemblyError::UndefinedProbability {
                context: context.to_string(),
            })
        }
    }

    /// Whether a value is present
    pub fn is_defined(self) -> bool {
        !self.0.is_nan()
    }

    /// `1 - p`
    pub fn complement(self) -> Self {
        Self::clamped(1.0 - self.0)
    }

    /// Probability that at least one of two independent events occurs
    ///
    /// Evaluated as `a + b(1 - a)`, which equals `1 - (1 - a)(1 - b)` but
    /// keeps its precision for probabilities near zero.
    pub fn union(self, other: Probability) -> Self {
        Self::clamped(self.0 + other.0 * (1.0 - self.0))
    }

    /// Independent-event union `1 - Π(1 - pᵢ)`; zero for no events
    pub fn union_all<I>(probabilities: I) -> Self
    where
        I: IntoIterator<Item = Probability>,
    {
        probabilities
            .into_iter()
            .reduce(Probability::union)
            .unwrap_or(Self::ZERO)
    }

    /// `p · factor`, clamped into [0, 1]
    pub fn scale(self, factor: f64) -> Self {
        Self::clamped(self.0 * factor)
    }

    /// `p / divisor`, clamped into [0, 1]
    pub fn divide_by(self, divisor: f64) -> Self {
        Self::clamped(self.0 / divisor)
    }

    /// Larger of two probabilities; undefined if either is
    pub fn max(self, other: Probability) -> Self {
        if !self.is_defined() || !other.is_defined() {
            return Self::UNDEFINED;
        }
        Self(self.0.max(other.0))
    }

    /// Smaller of two probabilities; undefined if either is
    pub fn min(self, other: Probability) -> Self {
        if !self.is_defined() || !other.is_defined() {
            return Self::UNDEFINED;
        }
        Self(self.0.min(other.0))
    }

    /// Reliability index `β = -Φ⁻¹(p)`; `+∞` for 0, `-∞` for 1, NaN if undefined
    pub fn to_reliability(self) -> f64 {
        statistics::probability_to_reliability(self.0)
    }

    /// Compare in reliability-index space with
    /// [`DEFAULT_NEGLIGIBLE_DIFFERENCE`]
    pub fn is_negligible_difference(self, other: Probability) -> bool {
        self.is_negligible_difference_within(other, DEFAULT_NEGLIGIBLE_DIFFERENCE)
    }

    /// Whether the reliability indices of both probabilities differ by at
    /// most `relative` (relative to the larger index, at least 1)
    ///
    /// Two undefined probabilities are equal; undefined and defined are not.
    pub fn is_negligible_difference_within(self, other: Probability, relative: f64) -> bool {
        match (self.is_defined(), other.is_defined()) {
            (false, false) => return true,
            (true, true) => {}
            _ => return false,
        }
        let beta = self.to_reliability();
        let other_beta = other.to_reliability();
        if beta.is_infinite() || other_beta.is_infinite() {
            return beta == other_beta;
        }
        let scale = beta.abs().max(other_beta.abs()).max(1.0);
        (beta - other_beta).abs() <= relative * scale
    }

    /// Return period `1/p` in years; infinite for zero
    pub fn return_period(self) -> f64 {
        1.0 / self.0
    }
}

impl PartialEq for Probability {
    fn eq(&self, other: &Self) -> bool {
        (!self.is_defined() && !other.is_defined()) || self.0 == other.0
    }
}

impl PartialOrd for Probability {
    /// Undefined is unordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            write!(f, "{:e}", self.0)
        } else {
            write!(f, "undefined")
        }
    }
}

impl TryFrom<Option<f64>> for Probability {
    type Error = AssemblyError;

    fn try_from(value: Option<f64>) -> Result<Self> {
        value.map_or(Ok(Self::UNDEFINED), Self::new)
    }
}

impl From<Probability> for Option<f64> {
    fn from(probability: Probability) -> Self {
        probability.is_defined().then_some(probability.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn p(value: f64) -> Probability {
        Probability::new(value).unwrap()
    }

    #[test]
    fn test_probability_creation() {
        assert_eq!(p(0.25).value(), 0.25);
        assert_eq!(p(0.0), Probability::ZERO);
        assert_eq!(p(1.0), Probability::ONE);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let error = Probability::new(-0.1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Range);
        assert!(Probability::new(1.000_001).is_err());
        assert!(Probability::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_nan_is_undefined() {
        let undefined = Probability::new(f64::NAN).unwrap();
        assert!(!undefined.is_defined());
        assert_eq!(undefined, Probability::UNDEFINED);
        assert_ne!(undefined, Probability::ZERO);
    }

    #[test]
    fn test_defined_value() {
        assert_eq!(p(0.1).defined_value("lookup"), Ok(0.1));
        let error = Probability::UNDEFINED.defined_value("lookup").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UndefinedValue);
        assert!(error.to_string().contains("lookup"));
    }

    #[test]
    fn test_complement() {
        assert_eq!(p(0.25).complement(), p(0.75));
        assert!(!Probability::UNDEFINED.complement().is_defined());
    }

    #[test]
    fn test_union() {
        let union = p(0.1).union(p(0.2));
        assert!((union.value() - 0.28).abs() < 1e-15);
        assert_eq!(p(0.3).union(Probability::ZERO), p(0.3));
        assert!(!p(0.3).union(Probability::UNDEFINED).is_defined());
    }

    #[test]
    fn test_union_all() {
        assert_eq!(Probability::union_all([]), Probability::ZERO);
        assert_eq!(Probability::union_all([p(0.4)]), p(0.4));
        let union = Probability::union_all([p(0.5), p(0.5), p(0.5)]);
        assert!((union.value() - 0.875).abs() < 1e-15);
    }

    #[test]
    fn test_scale_clamps() {
        assert_eq!(p(0.2).scale(10.0), Probability::ONE);
        assert_eq!(p(0.2).scale(0.5), p(0.1));
        assert_eq!(p(0.2).scale(-1.0), Probability::ZERO);
        assert_eq!(p(0.2).divide_by(4.0), p(0.05));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(p(0.2).max(p(0.3)), p(0.3));
        assert_eq!(p(0.2).min(p(0.3)), p(0.2));
        assert!(!p(0.2).max(Probability::UNDEFINED).is_defined());
    }

    #[test]
    fn test_ordering() {
        assert!(p(0.1) < p(0.2));
        assert_eq!(Probability::UNDEFINED.partial_cmp(&p(0.2)), None);
    }

    #[test]
    fn test_reliability_conversion() {
        assert_eq!(Probability::ZERO.to_reliability(), f64::INFINITY);
        assert_eq!(Probability::ONE.to_reliability(), f64::NEG_INFINITY);
        assert!(p(0.5).to_reliability().abs() < 1e-12);

        let back = Probability::from_reliability(p(1e-5).to_reliability());
        assert!(back.is_negligible_difference(p(1e-5)));
    }

    #[test]
    fn test_negligible_difference_works_in_index_space() {
        // Absolute difference is tiny but relatively large near zero
        assert!(!p(1e-7).is_negligible_difference(p(2e-7)));
        assert!(p(1e-7).is_negligible_difference(p(1e-7 * (1.0 + 1e-9))));
        assert!(Probability::ZERO.is_negligible_difference(Probability::ZERO));
        assert!(!Probability::ZERO.is_negligible_difference(p(1e-300)));
    }

    #[test]
    fn test_negligible_difference_with_undefined() {
        assert!(Probability::UNDEFINED.is_negligible_difference(Probability::UNDEFINED));
        assert!(!Probability::UNDEFINED.is_negligible_difference(p(0.1)));
    }

    #[test]
    fn test_return_period() {
        assert_eq!(p(1.0 / 1000.0).return_period().round(), 1000.0);
        assert_eq!(Probability::ZERO.return_period(), f64::INFINITY);
    }

    #[test]
    fn test_display() {
        assert_eq!(p(0.001).to_string(), "1e-3");
        assert_eq!(Probability::UNDEFINED.to_string(), "undefined");
    }

    #[test]
    fn test_serde_uses_null_for_undefined() {
        assert_eq!(serde_json::to_string(&p(0.5)).unwrap(), "0.5");
        assert_eq!(serde_json::to_string(&Probability::UNDEFINED).unwrap(), "null");

        let parsed: Probability = serde_json::from_str("null").unwrap();
        assert!(!parsed.is_defined());
        assert!(serde_json::from_str::<Probability>("1.5").is_err());
    }
}
