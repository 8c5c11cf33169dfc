//! Assembly Categories
//!
//! Derives the category lists used by every assembly step from the two
//! regulatory norms of an assessment section: the signal probability `Ps` and
//! the maximum allowable probability `Pmax`.
//!
//! | List | Used by | Depends on `N` |
//! |------|---------|----------------|
//! | Assessment grades (A+ to D) | assessment grade assembly | no |
//! | Failure mechanism categories (It to VIt) | mechanism classification | yes |
//! | Interpretation categories (III+ to III-) | section verdicts | yes |
//!
//! `N` is the length-effect factor of the failure mechanism; it tightens the
//! limits of long mechanisms so their contribution stays within the norm.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calculator;

pub use calculator::CategoryLimitsCalculator;
