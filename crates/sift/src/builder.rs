//! Conditional predicate builder.
//!
//! Every append method takes a `condition` first. When it is `false` the call
//! does nothing and hands the builder back, so optional inputs can be chained
//! without branching at the call site:
//!
//! ```
//! use sift::PredicateBuilder;
//!
//! struct UserSearch {
//!     id: Option<i64>,
//!     username: Option<String>,
//! }
//!
//! let search = UserSearch { id: None, username: Some("Ro".into()) };
//!
//! let filter = PredicateBuilder::new()
//!     .equal(search.id.is_some(), "id", search.id.unwrap_or_default())
//!     .like_right(
//!         search.username.is_some(),
//!         "username",
//!         search.username.as_deref().unwrap_or_default(),
//!     )
//!     .build();
//!
//! assert_eq!(filter.len(), 1);
//! assert_eq!(filter.to_string(), "username LIKE 'Ro%'");
//! ```

use tracing::trace;

use crate::composite::{BooleanOperator, CompositeFilter, Filter};
use crate::fragment::{FilterFragment, Predicate};
use crate::operand::Operand;
use crate::pattern::LikePattern;

/// Accumulates filter fragments and combines them with one operator.
///
/// The operator is fixed at construction: [`PredicateBuilder::new`] joins
/// with AND, [`PredicateBuilder::with_operator`] picks one. Mixed logic is
/// expressed with the [`and`](Self::and) and [`or`](Self::or) sub-groups.
///
/// # Example
///
/// ```
/// use sift::{BooleanOperator, PredicateBuilder};
///
/// // (id = 1 AND username = 'Ross') OR (id = 3 AND username = 'Gloria')
/// let filter = PredicateBuilder::with_operator(BooleanOperator::Or)
///     .and(|b| b.equal(true, "id", 1).equal(true, "username", "Ross"))
///     .and(|b| b.equal(true, "id", 3).equal(true, "username", "Gloria"))
///     .build();
///
/// assert_eq!(
///     filter.to_string(),
///     "((id = 1 AND username = 'Ross') OR (id = 3 AND username = 'Gloria'))"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct PredicateBuilder {
    operator: BooleanOperator,
    filters: Vec<Filter>,
}

impl PredicateBuilder {
    /// Creates an empty builder joining with AND.
    pub fn new() -> Self {
        PredicateBuilder::default()
    }

    /// Creates an empty builder joining with `operator`.
    pub fn with_operator(operator: BooleanOperator) -> Self {
        PredicateBuilder {
            operator,
            filters: Vec::new(),
        }
    }

    // ========================================================================
    // Generic append
    // ========================================================================

    /// Appends `attribute <predicate>` if `condition` holds.
    pub fn when(mut self, condition: bool, attribute: &str, predicate: Predicate) -> Self {
        if condition {
            self.filters
                .push(Filter::Fragment(FilterFragment::new(attribute, predicate)));
        }
        self
    }

    /// Runs `f` with the contained value if `value` is `Some`.
    ///
    /// ```
    /// use sift::PredicateBuilder;
    ///
    /// let min_id: Option<i64> = Some(2);
    /// let filter = PredicateBuilder::new()
    ///     .when_some(min_id, |b, id| b.greater_than_or_equal(true, "id", id))
    ///     .build();
    /// assert_eq!(filter.to_string(), "id >= 2");
    /// ```
    pub fn when_some<V>(self, value: Option<V>, f: impl FnOnce(Self, V) -> Self) -> Self {
        match value {
            Some(v) => f(self, v),
            None => self,
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// `attribute = value`
    pub fn equal(self, condition: bool, attribute: &str, value: impl Into<Operand>) -> Self {
        self.when(condition, attribute, Predicate::Equal(value.into()))
    }

    /// `attribute <> value`
    pub fn not_equal(self, condition: bool, attribute: &str, value: impl Into<Operand>) -> Self {
        self.when(condition, attribute, Predicate::NotEqual(value.into()))
    }

    /// `attribute > value`
    pub fn greater_than(self, condition: bool, attribute: &str, value: impl Into<Operand>) -> Self {
        self.when(condition, attribute, Predicate::GreaterThan(value.into()))
    }

    /// `attribute >= value`
    pub fn greater_than_or_equal(
        self,
        condition: bool,
        attribute: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.when(
            condition,
            attribute,
            Predicate::GreaterThanOrEqual(value.into()),
        )
    }

    /// `attribute < value`
    pub fn less_than(self, condition: bool, attribute: &str, value: impl Into<Operand>) -> Self {
        self.when(condition, attribute, Predicate::LessThan(value.into()))
    }

    /// `attribute <= value`
    pub fn less_than_or_equal(
        self,
        condition: bool,
        attribute: &str,
        value: impl Into<Operand>,
    ) -> Self {
        self.when(condition, attribute, Predicate::LessThanOrEqual(value.into()))
    }

    /// `attribute BETWEEN lower AND upper`, inclusive.
    pub fn between(
        self,
        condition: bool,
        attribute: &str,
        lower: impl Into<Operand>,
        upper: impl Into<Operand>,
    ) -> Self {
        self.when(
            condition,
            attribute,
            Predicate::Between(lower.into(), upper.into()),
        )
    }

    // ========================================================================
    // Pattern match
    // ========================================================================

    /// `attribute LIKE '%keyword%'`
    pub fn like(self, condition: bool, attribute: &str, keyword: &str) -> Self {
        self.when(
            condition,
            attribute,
            Predicate::Like(LikePattern::contains(keyword)),
        )
    }

    /// `attribute LIKE '%keyword'`
    pub fn like_left(self, condition: bool, attribute: &str, keyword: &str) -> Self {
        self.when(
            condition,
            attribute,
            Predicate::Like(LikePattern::ends_with(keyword)),
        )
    }

    /// `attribute LIKE 'keyword%'`
    pub fn like_right(self, condition: bool, attribute: &str, keyword: &str) -> Self {
        self.when(
            condition,
            attribute,
            Predicate::Like(LikePattern::starts_with(keyword)),
        )
    }

    /// `attribute NOT LIKE '%keyword%'`
    pub fn not_like(self, condition: bool, attribute: &str, keyword: &str) -> Self {
        self.when(
            condition,
            attribute,
            Predicate::NotLike(LikePattern::contains(keyword)),
        )
    }

    /// `attribute NOT LIKE '%keyword'`
    pub fn not_like_left(self, condition: bool, attribute: &str, keyword: &str) -> Self {
        self.when(
            condition,
            attribute,
            Predicate::NotLike(LikePattern::ends_with(keyword)),
        )
    }

    /// `attribute NOT LIKE 'keyword%'`
    pub fn not_like_right(self, condition: bool, attribute: &str, keyword: &str) -> Self {
        self.when(
            condition,
            attribute,
            Predicate::NotLike(LikePattern::starts_with(keyword)),
        )
    }

    // ========================================================================
    // Membership and nullness
    // ========================================================================

    /// `attribute IN (values...)`
    pub fn is_in<I>(self, condition: bool, attribute: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        if !condition {
            return self;
        }
        let set = values.into_iter().map(Into::into).collect();
        self.when(true, attribute, Predicate::In(set))
    }

    /// `attribute NOT IN (values...)`
    pub fn not_in<I>(self, condition: bool, attribute: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        if !condition {
            return self;
        }
        let set = values.into_iter().map(Into::into).collect();
        self.when(true, attribute, Predicate::NotIn(set))
    }

    /// `attribute IS NULL`
    pub fn is_null(self, condition: bool, attribute: &str) -> Self {
        self.when(condition, attribute, Predicate::IsNull)
    }

    /// `attribute IS NOT NULL`
    pub fn is_not_null(self, condition: bool, attribute: &str) -> Self {
        self.when(condition, attribute, Predicate::IsNotNull)
    }

    // ========================================================================
    // Grouping
    // ========================================================================

    /// Appends an AND sub-group configured by `f`.
    pub fn and(self, f: impl FnOnce(PredicateBuilder) -> PredicateBuilder) -> Self {
        self.group(BooleanOperator::And, f)
    }

    /// Appends an OR sub-group configured by `f`.
    pub fn or(self, f: impl FnOnce(PredicateBuilder) -> PredicateBuilder) -> Self {
        self.group(BooleanOperator::Or, f)
    }

    fn group(
        mut self,
        operator: BooleanOperator,
        f: impl FnOnce(PredicateBuilder) -> PredicateBuilder,
    ) -> Self {
        let sub = f(PredicateBuilder::with_operator(operator)).build();
        self.filters.push(Filter::Group(sub));
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The operator this builder joins with.
    pub fn operator(&self) -> BooleanOperator {
        self.operator
    }

    /// Items appended so far.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Number of items appended so far.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Combines the appended items into a [`CompositeFilter`].
    ///
    /// A builder with nothing appended produces a filter matching every record.
    pub fn build(self) -> CompositeFilter {
        trace!(operator = %self.operator, items = self.filters.len(), "built filter");
        CompositeFilter::new(self.operator, self.filters)
    }
}
