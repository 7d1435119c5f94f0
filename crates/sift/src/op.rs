//! Comparison operators.
//!
//! [`Op`] names the kind of test a fragment performs, independent of its
//! operands. It is used for rendering and in error messages.

use std::cmp::Ordering;
use std::fmt;

/// Operator of a single filter fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Wildcard pattern match.
    Like,
    /// Negated wildcard pattern match.
    NotLike,
    /// Membership in a set of values.
    In,
    /// Non-membership in a set of values.
    NotIn,
    /// Attribute holds no value.
    IsNull,
    /// Attribute holds a value.
    IsNotNull,
    /// Inclusive range.
    Between,
}

impl Op {
    /// Returns `true` for operators that need an ordering between values.
    pub fn is_ordering(self) -> bool {
        matches!(self, Op::Gt | Op::Gte | Op::Lt | Op::Lte | Op::Between)
    }

    /// Evaluates a binary comparison given the ordering of
    /// `record value` relative to `operand`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the where-clause spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::In => "IN",
            Op::NotIn => "NOT IN",
            Op::IsNull => "IS NULL",
            Op::IsNotNull => "IS NOT NULL",
            Op::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
