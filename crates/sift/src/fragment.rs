//! Single-attribute predicates.
//!
//! A [`FilterFragment`] pairs an attribute name with a [`Predicate`]. It is
//! the leaf of every built filter.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, SiftError};
use crate::op::Op;
use crate::operand::Operand;
use crate::pattern::LikePattern;
use crate::value::Value;

/// The test a fragment applies to its attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predicate {
    /// `attribute = value`
    Equal(Operand),
    /// `attribute <> value`
    NotEqual(Operand),
    /// `attribute > value`
    GreaterThan(Operand),
    /// `attribute >= value`
    GreaterThanOrEqual(Operand),
    /// `attribute < value`
    LessThan(Operand),
    /// `attribute <= value`
    LessThanOrEqual(Operand),
    /// `attribute LIKE pattern`
    Like(LikePattern),
    /// `attribute NOT LIKE pattern`
    NotLike(LikePattern),
    /// `attribute IN (values...)`
    In(Vec<Operand>),
    /// `attribute NOT IN (values...)`
    NotIn(Vec<Operand>),
    /// `attribute IS NULL`
    IsNull,
    /// `attribute IS NOT NULL`
    IsNotNull,
    /// `attribute BETWEEN lower AND upper`, inclusive on both ends.
    Between(Operand, Operand),
}

impl Predicate {
    /// Returns the operator this predicate applies.
    pub fn op(&self) -> Op {
        match self {
            Predicate::Equal(_) => Op::Eq,
            Predicate::NotEqual(_) => Op::Ne,
            Predicate::GreaterThan(_) => Op::Gt,
            Predicate::GreaterThanOrEqual(_) => Op::Gte,
            Predicate::LessThan(_) => Op::Lt,
            Predicate::LessThanOrEqual(_) => Op::Lte,
            Predicate::Like(_) => Op::Like,
            Predicate::NotLike(_) => Op::NotLike,
            Predicate::In(_) => Op::In,
            Predicate::NotIn(_) => Op::NotIn,
            Predicate::IsNull => Op::IsNull,
            Predicate::IsNotNull => Op::IsNotNull,
            Predicate::Between(_, _) => Op::Between,
        }
    }
}

/// One atomic condition over a single attribute.
///
/// ```
/// use sift::{FilterFragment, Predicate, Value};
///
/// let fragment = FilterFragment::new("username", Predicate::Equal("Ross".into()));
/// assert!(fragment.matches(&Value::Text("Ross")).unwrap());
/// assert_eq!(fragment.to_string(), "username = 'Ross'");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterFragment {
    attribute: String,
    predicate: Predicate,
}

impl FilterFragment {
    /// Creates a new fragment.
    pub fn new(attribute: impl Into<String>, predicate: Predicate) -> Self {
        FilterFragment {
            attribute: attribute.into(),
            predicate,
        }
    }

    /// The attribute this fragment tests.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The test applied to the attribute.
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Evaluates this fragment against the attribute's value.
    ///
    /// Any test other than the null checks is false for [`Value::Null`].
    pub fn matches(&self, value: &Value<'_>) -> Result<bool> {
        let op = self.predicate.op();
        match &self.predicate {
            Predicate::IsNull => return Ok(value.is_null()),
            Predicate::IsNotNull => return Ok(!value.is_null()),
            _ if value.is_null() => return Ok(false),
            _ => {}
        }

        match &self.predicate {
            Predicate::Equal(operand)
            | Predicate::NotEqual(operand)
            | Predicate::GreaterThan(operand)
            | Predicate::GreaterThanOrEqual(operand)
            | Predicate::LessThan(operand)
            | Predicate::LessThanOrEqual(operand) => Ok(self
                .compare(op, value, operand)?
                .is_some_and(|ordering| op.eval_ordering(ordering))),

            Predicate::Like(pattern) => self.match_pattern(op, value, pattern),
            Predicate::NotLike(pattern) => Ok(!self.match_pattern(op, value, pattern)?),

            Predicate::In(set) => self.contains(op, value, set),
            Predicate::NotIn(set) => Ok(!self.contains(op, value, set)?),

            Predicate::Between(lower, upper) => {
                let above = self.compare(op, value, lower)?;
                let below = self.compare(op, value, upper)?;
                Ok(matches!(
                    (above, below),
                    (Some(Ordering::Greater | Ordering::Equal), Some(Ordering::Less | Ordering::Equal))
                ))
            }

            Predicate::IsNull | Predicate::IsNotNull => Ok(false),
        }
    }

    fn compare(&self, op: Op, value: &Value<'_>, operand: &Operand) -> Result<Option<Ordering>> {
        if op.is_ordering() && !operand.is_orderable() {
            return Err(SiftError::InvalidOperator {
                op: op.as_str(),
                value_type: operand.type_name(),
            });
        }
        operand
            .compare_value(value)
            .map_err(|(expected, actual)| self.mismatch(expected, actual))
    }

    fn match_pattern(&self, op: Op, value: &Value<'_>, pattern: &LikePattern) -> Result<bool> {
        match value {
            Value::Text(text) => pattern.is_match(text),
            other => Err(SiftError::InvalidOperator {
                op: op.as_str(),
                value_type: other.type_name(),
            }),
        }
    }

    fn contains(&self, op: Op, value: &Value<'_>, set: &[Operand]) -> Result<bool> {
        for operand in set {
            if self.compare(op, value, operand)? == Some(Ordering::Equal) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn mismatch(&self, expected: &'static str, actual: &'static str) -> SiftError {
        SiftError::TypeMismatch {
            attribute: self.attribute.clone(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for FilterFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.predicate.op();
        match &self.predicate {
            Predicate::Equal(v)
            | Predicate::NotEqual(v)
            | Predicate::GreaterThan(v)
            | Predicate::GreaterThanOrEqual(v)
            | Predicate::LessThan(v)
            | Predicate::LessThanOrEqual(v) => write!(f, "{} {op} {v}", self.attribute),
            Predicate::Like(p) | Predicate::NotLike(p) => write!(f, "{} {op} {p}", self.attribute),
            Predicate::In(set) | Predicate::NotIn(set) => {
                write!(f, "{} {op} (", self.attribute)?;
                for (i, v) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str(")")
            }
            Predicate::IsNull | Predicate::IsNotNull => write!(f, "{} {op}", self.attribute),
            Predicate::Between(lower, upper) => {
                write!(f, "{} {op} {lower} AND {upper}", self.attribute)
            }
        }
    }
}
