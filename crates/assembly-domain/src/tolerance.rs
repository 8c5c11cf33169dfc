//! Tolerance policy for boundary comparisons
//!
//! Every "is this the same boundary" decision in the kernel goes through a
//! [`Tolerance`]. Probability limits of category lists are compared with
//! [`Tolerance::PROBABILITY`]; positions along the assessment section (section
//! starts and ends, common-section breakpoints, total lengths) with
//! [`Tolerance::LENGTH`]. Section-list validation and the common-section merge
//! share the same constant, so both agree on what counts as one breakpoint.

/// Absolute tolerance for probability boundaries
pub const PROBABILITY_EPSILON: f64 = 1e-10;

/// Absolute tolerance for positions in meters
pub const LENGTH_EPSILON: f64 = 1e-8;

/// Absolute tolerance used to compare two boundary values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Tolerance for category limits
    pub const PROBABILITY: Tolerance = Tolerance(PROBABILITY_EPSILON);

    /// Tolerance for section boundaries and lengths
    pub const LENGTH: Tolerance = Tolerance(LENGTH_EPSILON);

    /// The absolute epsilon
    pub fn epsilon(self) -> f64 {
        self.0
    }

    /// `a` and `b` are the same boundary
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.0
    }

    /// `a` lies before `b` by more than the tolerance
    pub fn definitely_less(self, a: f64, b: f64) -> bool {
        a < b - self.0
    }

    /// `a` lies before `b` or is the same boundary
    pub fn less_or_approx(self, a: f64, b: f64) -> bool {
        a <= b + self.0
    }
}
