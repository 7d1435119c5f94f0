//! Record-side traits.
//!
//! [`Filterable`] is what `#[derive(Filterable)]` implements. It resolves an
//! attribute name to a [`Value`] and lists the attributes a record exposes.

use crate::composite::CompositeFilter;
use crate::error::Result;
use crate::value::{Timestamp, Value};

/// A record type that filters can be evaluated against.
///
/// Usually derived with `#[derive(Filterable)]` from `sift-macros`, which also
/// generates one constant per attribute (`User::USERNAME`) so filters can be
/// built without spelling attribute names by hand.
///
/// # Manual Implementation
///
/// ```
/// use sift::{Filterable, Number, PredicateBuilder, Value};
///
/// struct User {
///     id: i64,
///     username: String,
/// }
///
/// impl Filterable for User {
///     const ATTRIBUTES: &'static [&'static str] = &["id", "username"];
///
///     fn attribute_value(&self, attribute: &str) -> Option<Value<'_>> {
///         match attribute {
///             "id" => Some(Value::Number(Number::I64(self.id))),
///             "username" => Some(Value::Text(&self.username)),
///             _ => None,
///         }
///     }
/// }
///
/// let users = vec![
///     User { id: 1, username: "Ross".into() },
///     User { id: 2, username: "Julie".into() },
/// ];
/// let filter = PredicateBuilder::new().like_right(true, "username", "R").build();
/// let found = User::find_all(&users, &filter).unwrap();
/// assert_eq!(found.len(), 1);
/// ```
pub trait Filterable {
    /// Every attribute name this record resolves.
    const ATTRIBUTES: &'static [&'static str];

    /// Returns the value of an attribute, or `None` if there is no such
    /// attribute. A present-but-empty attribute is `Some(Value::Null)`.
    fn attribute_value(&self, attribute: &str) -> Option<Value<'_>>;

    /// Accessor function compatible with [`CompositeFilter`]'s execution
    /// methods.
    fn accessor<'a>(item: &'a Self, attribute: &str) -> Option<Value<'a>>
    where
        Self: Sized,
    {
        item.attribute_value(attribute)
    }

    /// Checks that every attribute `filter` mentions exists on this record.
    fn validate(filter: &CompositeFilter) -> Result<()>
    where
        Self: Sized,
    {
        filter.validate_attributes(Self::ATTRIBUTES)
    }

    /// Returns the records that match `filter`, in input order.
    ///
    /// Attribute names are validated against [`Filterable::ATTRIBUTES`] first,
    /// so a misspelled attribute fails even on an empty collection.
    fn find_all<'a>(items: &'a [Self], filter: &CompositeFilter) -> Result<Vec<&'a Self>>
    where
        Self: Sized,
    {
        Self::validate(filter)?;
        filter.find_all(items, Self::accessor)
    }
}

/// Converts an enum into a stable discriminant for filtering.
///
/// Used by `#[filter(Enum)]` fields.
///
/// ```
/// use sift::FilterEnum;
///
/// enum Role {
///     Admin,
///     Member,
/// }
///
/// impl FilterEnum for Role {
///     fn filter_discriminant(&self) -> u32 {
///         match self {
///             Role::Admin => 0,
///             Role::Member => 1,
///         }
///     }
/// }
/// ```
pub trait FilterEnum {
    /// Returns the discriminant for this variant.
    fn filter_discriminant(&self) -> u32;
}

/// Converts a datetime-like value into a [`Timestamp`].
///
/// Used by `#[filter(Timestamp)]` fields.
pub trait FilterTimestamp {
    /// Converts this value to a [`Timestamp`].
    fn filter_timestamp(&self) -> Timestamp;
}

impl FilterTimestamp for i64 {
    fn filter_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl FilterTimestamp for Timestamp {
    fn filter_timestamp(&self) -> Timestamp {
        *self
    }
}

impl FilterTimestamp for std::time::SystemTime {
    fn filter_timestamp(&self) -> Timestamp {
        let millis = match self.duration_since(std::time::UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map(|m| -m)
                .unwrap_or(i64::MIN),
        };
        Timestamp::from_millis(millis)
    }
}
