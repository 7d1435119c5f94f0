//! Sift - conditional predicate builder for record filters.
//!
//! Sift builds filters out of conditional fragments. Every append call takes a
//! `condition` first and does nothing when it is `false`, so filters can be
//! assembled from optional search inputs without branching:
//!
//! - Comparisons: equal, not equal, greater/less than (or equal), between
//! - Pattern matching: like / not like on both, left or right side
//! - Membership and nullness: in, not in, is null, is not null
//! - Boolean grouping: AND / OR sub-groups nested to any depth
//!
//! The built [`CompositeFilter`] is evaluated in memory against any record
//! type, through an accessor function or a [`Filterable`] implementation.
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{Number, PredicateBuilder, Value};
//!
//! struct User {
//!     id: i64,
//!     username: String,
//! }
//!
//! fn accessor<'a>(user: &'a User, attribute: &str) -> Option<Value<'a>> {
//!     match attribute {
//!         "id" => Some(Value::Number(Number::I64(user.id))),
//!         "username" => Some(Value::Text(&user.username)),
//!         _ => None,
//!     }
//! }
//!
//! let users = vec![
//!     User { id: 1, username: "Ross".into() },
//!     User { id: 2, username: "Julie".into() },
//!     User { id: 3, username: "Gloria".into() },
//!     User { id: 4, username: "Carol".into() },
//! ];
//!
//! let wanted: Option<&str> = None;
//! let filter = PredicateBuilder::new()
//!     .equal(wanted.is_some(), "username", wanted.unwrap_or_default())
//!     .or(|b| b.equal(true, "id", 1).equal(true, "id", 2))
//!     .build();
//!
//! let found = filter.find_all(&users, accessor).unwrap();
//! assert_eq!(found.len(), 2);
//! ```
//!
//! # Evaluation Semantics
//!
//! ```text
//! AND group = every item matches   (empty = matches everything)
//! OR group  = some item matches    (empty = matches everything)
//! ```
//!
//! A null attribute fails every test except `IS NULL`. Unknown attributes and
//! type mismatches between a filter value and a record value are reported as
//! [`SiftError`]s when the filter is evaluated, never when it is built.
//!
//! # Value Types and Operators
//!
//! | Type | Operators |
//! |------|-----------|
//! | Text | all |
//! | Number | all but like |
//! | Timestamp | all but like |
//! | Enum | equality, in, null checks |
//! | Bool | equality, in, null checks |

mod builder;
mod composite;
mod error;
mod fragment;
mod op;
mod operand;
mod pattern;
mod traits;
mod value;

pub use builder::PredicateBuilder;
pub use composite::{BooleanOperator, CompositeFilter, Filter};
pub use error::{Result, SiftError};
pub use fragment::{FilterFragment, Predicate};
pub use op::Op;
pub use operand::Operand;
pub use pattern::{LikePattern, MULTI_WILDCARD, SINGLE_WILDCARD};
pub use traits::{FilterEnum, FilterTimestamp, Filterable};
pub use value::{Number, Timestamp, Value};

#[cfg(feature = "derive")]
pub use sift_macros::Filterable;
