//! Categories and category lists partitioning [0, 1]

use crate::error::{AssemblyError, ErrorCollector, Result};
use crate::tolerance::Tolerance;
use crate::Probability;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// A closed categorical kind with an explicit severity rank
pub trait CategoryKind: Copy + Eq + Hash + fmt::Debug + fmt::Display {
    /// Severity rank; lower is better
    fn rank(&self) -> u8;

    /// The worse of two categories
    fn worst(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

/// A labelled probability interval `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Category<T> {
    category: T,
    lower_limit: Probability,
    upper_limit: Probability,
}

impl<T: CategoryKind> Category<T> {
    /// Create a category; both limits must be defined and ordered
    pub fn new(category: T, lower_limit: Probability, upper_limit: Probability) -> Result<Self> {
        if !lower_limit.is_defined() || !upper_limit.is_defined() {
            return Err(AssemblyError::CategoryLimitUndefined {
                category: category.to_string(),
            });
        }
        if lower_limit.value() > upper_limit.value() {
            return Err(AssemblyError::CategoryLimitsInverted {
                category: category.to_string(),
                lower: lower_limit.value(),
                upper: upper_limit.value(),
            });
        }
        Ok(Self {
            category,
            lower_limit,
            upper_limit,
        })
    }

    /// The label
    pub fn category(&self) -> T {
        self.category
    }

    /// Lower bound
    pub fn lower_limit(&self) -> Probability {
        self.lower_limit
    }

    /// Upper bound
    pub fn upper_limit(&self) -> Probability {
        self.upper_limit
    }

    /// Whether `probability` lies within `[lower, upper]`
    pub fn contains(&self, probability: Probability) -> bool {
        probability.is_defined()
            && probability.value() >= self.lower_limit.value()
            && probability.value() <= self.upper_limit.value()
    }
}

/// An ordered, gapless partition of [0, 1] into categories
///
/// # Examples
///
/// ```
/// use assembly_domain::{AssessmentGrade, Category, CategoryList, Probability};
///
/// let p = |v| Probability::new(v).unwrap();
/// let list = CategoryList::new(vec![
///     Category::new(AssessmentGrade::A, p(0.0), p(0.1)).unwrap(),
///     Category::new(AssessmentGrade::D, p(0.1), p(1.0)).unwrap(),
/// ])
/// .unwrap();
///
/// let found = list.get_category_for_probability(p(0.1)).unwrap();
/// assert_eq!(found.category(), AssessmentGrade::A);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryList<T> {
    categories: Vec<Category<T>>,
}

impl<T: CategoryKind> CategoryList<T> {
    /// Validate and create a category list
    ///
    /// The first lower limit must be 0, the last upper limit 1, and every
    /// lower limit must equal the previous upper limit, all within
    /// [`Tolerance::PROBABILITY`]. Every violation is reported.
    pub fn new(categories: Vec<Category<T>>) -> Result<Self> {
        let tolerance = Tolerance::PROBABILITY;
        let (Some(first), Some(last)) = (categories.first(), categories.last()) else {
            return Err(AssemblyError::CategoryListEmpty);
        };

        let mut errors = ErrorCollector::new();
        if !tolerance.approx_eq(first.lower_limit.value(), 0.0) {
            errors.push(AssemblyError::CategoryListInvalidLowerLimit {
                category: first.category.to_string(),
                lower: first.lower_limit.value(),
            });
        }
        if !tolerance.approx_eq(last.upper_limit.value(), 1.0) {
            errors.push(AssemblyError::CategoryListInvalidUpperLimit {
                category: last.category.to_string(),
                upper: last.upper_limit.value(),
            });
        }
        for pair in categories.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if !tolerance.approx_eq(previous.upper_limit.value(), next.lower_limit.value()) {
                errors.push(AssemblyError::CategoryListNotContiguous {
                    previous: previous.category.to_string(),
                    next: next.category.to_string(),
                    upper: previous.upper_limit.value(),
                    lower: next.lower_limit.value(),
                });
            }
        }

        errors.finish_with(Self { categories })
    }

    /// The categories, lowest probability first
    pub fn categories(&self) -> &[Category<T>] {
        &self.categories
    }

    /// Iterate over the categories
    pub fn iter(&self) -> impl Iterator<Item = &Category<T>> {
        self.categories.iter()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false; construction rejects empty lists
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category containing `probability`
    ///
    /// Scans upward and returns the first category whose upper limit is at
    /// least `probability`, so a value on a boundary belongs to the lower
    /// (better) category.
    pub fn get_category_for_probability(&self, probability: Probability) -> Result<&Category<T>> {
        let value = probability.defined_value("category lookup")?;
        self.categories
            .iter()
            .find(|c| value <= c.upper_limit.value())
            .or_else(|| self.categories.last())
            .ok_or(AssemblyError::CategoryListEmpty)
    }

    /// Label of the category containing `probability`
    pub fn category_for(&self, probability: Probability) -> Result<T> {
        self.get_category_for_probability(probability)
            .map(Category::category)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::InterpretationCategory;
    use proptest::prelude::*;

    /// A random valid partition of [0, 1] into the probabilistic categories
    fn partition() -> impl Strategy<Value = CategoryList<InterpretationCategory>> {
        prop::collection::vec(0.0f64..=1.0, 6).prop_map(|mut cuts| {
            cuts.sort_by(f64::total_cmp);
            let mut limits = vec![0.0];
            limits.extend(cuts);
            limits.push(1.0);
            let categories = InterpretationCategory::PROBABILISTIC
                .iter()
                .zip(limits.windows(2))
                .map(|(c, w)| {
                    Category::new(
                        *c,
                        Probability::new(w[0]).unwrap(),
                        Probability::new(w[1]).unwrap(),
                    )
                    .unwrap()
                })
                .collect();
            CategoryList::new(categories).unwrap()
        })
    }

    proptest! {
        /// Property: every defined probability maps to exactly one
        /// category that contains it
        #[test]
        fn test_lookup_totality(list in partition(), value in 0.0f64..=1.0) {
            let probability = Probability::new(value).unwrap();
            let category = list.get_category_for_probability(probability).unwrap();
            prop_assert!(category.lower_limit().value() <= value);
            prop_assert!(value <= category.upper_limit().value());
        }

        /// Property: moving any inner boundary breaks construction
        #[test]
        fn test_gap_is_rejected(list in partition(), index in 1usize..7, shift in 1e-6f64..1e-3) {
            let mut categories = list.categories().to_vec();
            let moved = &categories[index];
            let lower = (moved.lower_limit().value() + shift).min(moved.upper_limit().value());
            prop_assume!(lower - moved.lower_limit().value() > 1e-9);
            categories[index] = Category::new(
                moved.category(),
                Probability::new(lower).unwrap(),
                moved.upper_limit(),
            )
            .unwrap();
            prop_assert!(CategoryList::new(categories).is_err());
        }
    }
}
