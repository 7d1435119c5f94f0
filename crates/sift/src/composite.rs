//! Built filters and their evaluation.
//!
//! A [`CompositeFilter`] is a group of [`Filter`]s joined by one
//! [`BooleanOperator`]. Groups nest, which is how mixed AND/OR logic is
//! expressed:
//!
//! ```text
//! (a AND b) OR (c AND d)  =>  Or[ Group(And[a, b]), Group(And[c, d]) ]
//! ```
//!
//! An empty group matches every record, whichever its operator.

use std::fmt;

use tracing::debug;

use crate::error::{Result, SiftError};
use crate::fragment::FilterFragment;
use crate::value::Value;

/// How the items of a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanOperator {
    /// Every item must match.
    #[default]
    And,
    /// At least one item must match.
    Or,
}

impl BooleanOperator {
    /// Returns the where-clause spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
        }
    }
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item of a group: a fragment or a nested group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Filter {
    /// A single-attribute predicate.
    Fragment(FilterFragment),
    /// A nested group with its own operator.
    Group(CompositeFilter),
}

impl Filter {
    fn matches<T, F>(&self, item: &T, accessor: &F) -> Result<bool>
    where
        for<'a> F: Fn(&'a T, &str) -> Option<Value<'a>>,
    {
        match self {
            Filter::Fragment(fragment) => {
                let value = accessor(item, fragment.attribute()).ok_or_else(|| {
                    SiftError::UnknownAttribute {
                        attribute: fragment.attribute().to_string(),
                    }
                })?;
                fragment.matches(&value)
            }
            Filter::Group(group) => group.matches(item, accessor),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Fragment(fragment) => fmt::Display::fmt(fragment, f),
            Filter::Group(group) => fmt::Display::fmt(group, f),
        }
    }
}

/// A built filter: items combined with a single boolean operator.
///
/// Produced by [`PredicateBuilder::build`](crate::PredicateBuilder::build).
///
/// # Execution
///
/// The execution methods take an accessor that resolves an attribute name on
/// a record. Returning `None` means the record has no such attribute, which
/// fails evaluation with [`SiftError::UnknownAttribute`]. Records deriving
/// [`Filterable`](crate::Filterable) can pass `Record::accessor`.
///
/// Evaluation short-circuits: once an AND group sees a non-match (or an OR
/// group a match), its remaining items are not evaluated and cannot fail.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeFilter {
    operator: BooleanOperator,
    filters: Vec<Filter>,
}

impl CompositeFilter {
    pub(crate) fn new(operator: BooleanOperator, filters: Vec<Filter>) -> Self {
        CompositeFilter { operator, filters }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The operator joining this group's items.
    pub fn operator(&self) -> BooleanOperator {
        self.operator
    }

    /// The group's items, in append order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Number of top-level items.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if the group has no items (matches everything).
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Every attribute mentioned anywhere in the tree, depth first.
    pub fn attributes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes<'s>(&'s self, out: &mut Vec<&'s str>) {
        for filter in &self.filters {
            match filter {
                Filter::Fragment(fragment) => out.push(fragment.attribute()),
                Filter::Group(group) => group.collect_attributes(out),
            }
        }
    }

    /// Checks every attribute in the tree against a list of known names.
    ///
    /// Use this to catch misspelled attributes before any record is scanned.
    pub fn validate_attributes(&self, known: &[&str]) -> Result<()> {
        match self.attributes().into_iter().find(|a| !known.contains(a)) {
            Some(unknown) => Err(SiftError::UnknownAttribute {
                attribute: unknown.to_string(),
            }),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests a single record.
    pub fn matches<T, F>(&self, item: &T, accessor: &F) -> Result<bool>
    where
        for<'a> F: Fn(&'a T, &str) -> Option<Value<'a>>,
    {
        match self.operator {
            BooleanOperator::And => {
                for filter in &self.filters {
                    if !filter.matches(item, accessor)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            BooleanOperator::Or => {
                if self.filters.is_empty() {
                    return Ok(true);
                }
                for filter in &self.filters {
                    if filter.matches(item, accessor)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Returns every matching record, in input order.
    pub fn find_all<'a, T, F>(&self, items: &'a [T], accessor: F) -> Result<Vec<&'a T>>
    where
        for<'b> F: Fn(&'b T, &str) -> Option<Value<'b>>,
    {
        let mut results = Vec::new();
        for item in items {
            if self.matches(item, &accessor)? {
                results.push(item);
            }
        }
        debug!(
            filter = %self,
            matched = results.len(),
            total = items.len(),
            "evaluated filter"
        );
        Ok(results)
    }

    /// Returns the first matching record.
    pub fn find_first<'a, T, F>(&self, items: &'a [T], accessor: F) -> Result<Option<&'a T>>
    where
        for<'b> F: Fn(&'b T, &str) -> Option<Value<'b>>,
    {
        for item in items {
            if self.matches(item, &accessor)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Counts matching records.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> Result<usize>
    where
        for<'a> F: Fn(&'a T, &str) -> Option<Value<'a>>,
    {
        let mut count = 0;
        for item in items {
            if self.matches(item, &accessor)? {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl fmt::Display for CompositeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.filters.as_slice() {
            [] => f.write_str("TRUE"),
            [only] => fmt::Display::fmt(only, f),
            [first, rest @ ..] => {
                write!(f, "({first}")?;
                for filter in rest {
                    write!(f, " {} {filter}", self.operator)?;
                }
                f.write_str(")")
            }
        }
    }
}
