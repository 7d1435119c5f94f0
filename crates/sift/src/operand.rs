//! Owned comparison values stored inside filter fragments.

use std::fmt;

use crate::traits::{FilterEnum, FilterTimestamp};
use crate::value::{Number, Timestamp, Value};

/// Owned value a fragment compares record attributes against.
///
/// Unlike [`Value`], which borrows from the record, `Operand` owns its data
/// so it can live inside a built filter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(Number),
    /// Timestamp value.
    Timestamp(Timestamp),
    /// Enum discriminant.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
}

impl Operand {
    /// Builds an operand from an enum implementing [`FilterEnum`].
    pub fn from_enum<E: FilterEnum>(value: &E) -> Self {
        Operand::Enum(value.filter_discriminant())
    }

    /// Builds an operand from any [`FilterTimestamp`] source.
    pub fn from_timestamp<S: FilterTimestamp>(value: &S) -> Self {
        Operand::Timestamp(value.filter_timestamp())
    }

    /// Name of the operand's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Text(_) => "text",
            Operand::Number(_) => "number",
            Operand::Timestamp(_) => "timestamp",
            Operand::Enum(_) => "enum",
            Operand::Bool(_) => "bool",
        }
    }

    /// Returns `true` if values of this type have a meaningful order.
    pub fn is_orderable(&self) -> bool {
        matches!(
            self,
            Operand::Text(_) | Operand::Number(_) | Operand::Timestamp(_)
        )
    }

    /// Compares a record value against this operand.
    ///
    /// Returns `Ok(None)` when both sides have the same type but no order
    /// exists between them (NaN). Returns `Err((expected, actual))` when the
    /// types differ. `Null` must be handled by the caller.
    pub(crate) fn compare_value(
        &self,
        value: &Value<'_>,
    ) -> std::result::Result<Option<std::cmp::Ordering>, (&'static str, &'static str)> {
        match (value, self) {
            (Value::Text(field), Operand::Text(operand)) => Ok(Some((*field).cmp(operand.as_str()))),
            (Value::Number(field), Operand::Number(operand)) => Ok(field.compare(*operand)),
            (Value::Timestamp(field), Operand::Timestamp(operand)) => Ok(Some(field.cmp(operand))),
            (Value::Enum(field), Operand::Enum(operand)) => Ok(Some(field.cmp(operand))),
            (Value::Bool(field), Operand::Bool(operand)) => Ok(Some(field.cmp(operand))),
            _ => Err((self.type_name(), value.type_name())),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Operand::Number(Number::I64(n)) => write!(f, "{n}"),
            Operand::Number(Number::U64(n)) => write!(f, "{n}"),
            Operand::Number(Number::F64(n)) => write!(f, "{n}"),
            Operand::Timestamp(ts) => write!(f, "TIMESTAMP({})", ts.as_millis()),
            Operand::Enum(d) => write!(f, "#{d}"),
            Operand::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<&String> for Operand {
    fn from(s: &String) -> Self {
        Operand::Text(s.clone())
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<Timestamp> for Operand {
    fn from(t: Timestamp) -> Self {
        Operand::Timestamp(t)
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

macro_rules! operand_from_number {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Operand {
                fn from(n: $source) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )+
    };
}

operand_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
