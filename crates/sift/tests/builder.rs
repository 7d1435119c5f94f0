//! End-to-end filter scenarios over a derived record type.

use sift::{BooleanOperator, FilterEnum, Filterable, PredicateBuilder, SiftError, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Role {
    Admin,
    Member,
}

impl FilterEnum for Role {
    fn filter_discriminant(&self) -> u32 {
        match self {
            Role::Admin => 0,
            Role::Member => 1,
        }
    }
}

#[derive(Debug, sift_macros::Filterable)]
struct User {
    #[filter(Number)]
    id: i64,

    #[filter(Text)]
    username: String,

    #[filter(Text)]
    nickname: Option<String>,

    #[filter(Enum)]
    role: Role,

    #[filter(Timestamp)]
    joined: i64,

    #[filter(Bool)]
    active: bool,

    #[filter(skip)]
    #[allow(dead_code)]
    password_hash: String,
}

fn user(id: i64, username: &str, nickname: Option<&str>, role: Role) -> User {
    User {
        id,
        username: username.to_string(),
        nickname: nickname.map(str::to_string),
        role,
        joined: id * 1_000,
        active: id % 2 == 1,
        password_hash: String::new(),
    }
}

fn users() -> Vec<User> {
    vec![
        user(1, "Ross", None, Role::Admin),
        user(2, "Julie", Some("Jules"), Role::Member),
        user(3, "Gloria", None, Role::Member),
        user(4, "Carol", Some("Caz"), Role::Member),
    ]
}

fn ids(builder: PredicateBuilder) -> Vec<i64> {
    let users = users();
    let filter = builder.build();
    User::find_all(&users, &filter)
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect()
}

fn count(builder: PredicateBuilder) -> usize {
    ids(builder).len()
}

// ============================================================================
// Per-operator counts, true and false conditions
// ============================================================================

#[test]
fn equal() {
    let b = PredicateBuilder::new()
        .equal(true, User::ID, 1)
        .equal(true, User::USERNAME, "Ross");
    assert_eq!(ids(b), vec![1]);
    assert_eq!(count(PredicateBuilder::new().equal(false, User::ID, 1)), 4);
}

#[test]
fn not_equal() {
    assert_eq!(count(PredicateBuilder::new().not_equal(true, User::ID, 1)), 3);
    assert_eq!(count(PredicateBuilder::new().not_equal(false, User::ID, 1)), 4);
}

#[test]
fn greater_than() {
    assert_eq!(count(PredicateBuilder::new().greater_than(true, User::ID, 1)), 3);
    assert_eq!(count(PredicateBuilder::new().greater_than(false, User::ID, 1)), 4);
}

#[test]
fn greater_than_or_equal() {
    assert_eq!(
        count(PredicateBuilder::new().greater_than_or_equal(true, User::ID, 2)),
        3
    );
    assert_eq!(
        count(PredicateBuilder::new().greater_than_or_equal(false, User::ID, 2)),
        4
    );
}

#[test]
fn less_than() {
    assert_eq!(count(PredicateBuilder::new().less_than(true, User::ID, 3)), 2);
    assert_eq!(count(PredicateBuilder::new().less_than(false, User::ID, 3)), 4);
}

#[test]
fn less_than_or_equal() {
    assert_eq!(
        count(PredicateBuilder::new().less_than_or_equal(true, User::ID, 3)),
        3
    );
    assert_eq!(
        count(PredicateBuilder::new().less_than_or_equal(false, User::ID, 3)),
        4
    );
}

#[test]
fn like() {
    // case-sensitive: "Ross" has no lowercase r
    assert_eq!(ids(PredicateBuilder::new().like(true, User::USERNAME, "r")), vec![3, 4]);
    assert_eq!(count(PredicateBuilder::new().like(false, User::USERNAME, "r")), 4);
}

#[test]
fn like_left() {
    assert_eq!(ids(PredicateBuilder::new().like_left(true, User::USERNAME, "s")), vec![1]);
    assert_eq!(count(PredicateBuilder::new().like_left(false, User::USERNAME, "s")), 4);
}

#[test]
fn like_right() {
    assert_eq!(ids(PredicateBuilder::new().like_right(true, User::USERNAME, "R")), vec![1]);
    assert_eq!(count(PredicateBuilder::new().like_right(false, User::USERNAME, "R")), 4);
}

#[test]
fn not_like() {
    assert_eq!(count(PredicateBuilder::new().not_like(true, User::USERNAME, "s")), 3);
    assert_eq!(count(PredicateBuilder::new().not_like(false, User::USERNAME, "s")), 4);
}

#[test]
fn not_like_left() {
    assert_eq!(
        count(PredicateBuilder::new().not_like_left(true, User::USERNAME, "s")),
        3
    );
    assert_eq!(
        count(PredicateBuilder::new().not_like_left(false, User::USERNAME, "s")),
        4
    );
}

#[test]
fn not_like_right() {
    assert_eq!(
        count(PredicateBuilder::new().not_like_right(true, User::USERNAME, "R")),
        3
    );
    assert_eq!(
        count(PredicateBuilder::new().not_like_right(false, User::USERNAME, "R")),
        4
    );
}

#[test]
fn is_in() {
    assert_eq!(ids(PredicateBuilder::new().is_in(true, User::ID, [1, 2])), vec![1, 2]);
    assert_eq!(count(PredicateBuilder::new().is_in(false, User::ID, [1, 2])), 4);
}

#[test]
fn not_in() {
    assert_eq!(ids(PredicateBuilder::new().not_in(true, User::ID, [1, 2])), vec![3, 4]);
    assert_eq!(count(PredicateBuilder::new().not_in(false, User::ID, [1, 2])), 4);
}

#[test]
fn empty_sets() {
    let none: [i64; 0] = [];
    assert_eq!(count(PredicateBuilder::new().is_in(true, User::ID, none)), 0);
    assert_eq!(count(PredicateBuilder::new().not_in(true, User::ID, none)), 4);
}

#[test]
fn is_null() {
    assert_eq!(count(PredicateBuilder::new().is_null(true, User::ID)), 0);
    assert_eq!(count(PredicateBuilder::new().is_null(false, User::ID)), 4);
    assert_eq!(ids(PredicateBuilder::new().is_null(true, User::NICKNAME)), vec![1, 3]);
}

#[test]
fn is_not_null() {
    assert_eq!(count(PredicateBuilder::new().is_not_null(true, User::ID)), 4);
    assert_eq!(count(PredicateBuilder::new().is_not_null(false, User::ID)), 4);
    assert_eq!(
        ids(PredicateBuilder::new().is_not_null(true, User::NICKNAME)),
        vec![2, 4]
    );
}

#[test]
fn between() {
    assert_eq!(ids(PredicateBuilder::new().between(true, User::ID, 2, 3)), vec![2, 3]);
    assert_eq!(count(PredicateBuilder::new().between(false, User::ID, 2, 3)), 4);
    assert_eq!(count(PredicateBuilder::new().between(true, User::ID, 3, 2)), 0);
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn or_group_inside_and_builder() {
    let b = PredicateBuilder::new().or(|b| b.equal(true, User::ID, 1).equal(true, User::ID, 2));
    assert_eq!(ids(b), vec![1, 2]);
}

#[test]
fn and_narrows_to_intersection() {
    let b = PredicateBuilder::new()
        .greater_than(true, User::ID, 1)
        .like(true, User::USERNAME, "l");
    assert_eq!(ids(b), vec![2, 3, 4]);

    let b = PredicateBuilder::new()
        .greater_than(true, User::ID, 2)
        .like_left(true, User::USERNAME, "a");
    assert_eq!(ids(b), vec![3]);
}

#[test]
fn or_builder_yields_union() {
    let b = PredicateBuilder::with_operator(BooleanOperator::Or)
        .like_right(true, User::USERNAME, "J")
        .equal(true, User::ID, 4);
    assert_eq!(ids(b), vec![2, 4]);
}

#[test]
fn and_groups_inside_or_builder() {
    let b = PredicateBuilder::with_operator(BooleanOperator::Or)
        .and(|b| b.equal(true, User::ID, 1).equal(true, User::USERNAME, "Ross"))
        .and(|b| b.equal(true, User::ID, 3).equal(true, User::USERNAME, "Gloria"))
        .and(|b| b.equal(true, User::ID, 4).equal(true, User::USERNAME, "Ross"));
    assert_eq!(ids(b), vec![1, 3]);
}

#[test]
fn deep_nesting() {
    // id > 1 AND (username LIKE 'J%' OR (nickname IS NULL AND id = 3))
    let b = PredicateBuilder::new().greater_than(true, User::ID, 1).or(|b| {
        b.like_right(true, User::USERNAME, "J")
            .and(|b| b.is_null(true, User::NICKNAME).equal(true, User::ID, 3))
    });
    assert_eq!(ids(b), vec![2, 3]);
}

#[test]
fn empty_group_matches_all() {
    assert_eq!(count(PredicateBuilder::new().or(|b| b)), 4);
    assert_eq!(count(PredicateBuilder::new().and(|b| b.equal(false, User::ID, 1))), 4);
}

#[test]
fn empty_filter_matches_all() {
    assert_eq!(count(PredicateBuilder::new()), 4);
    assert_eq!(count(PredicateBuilder::with_operator(BooleanOperator::Or)), 4);
}

#[test]
fn optional_search_inputs() {
    let username: Option<&str> = Some("Ju");
    let min_id: Option<i64> = None;
    let b = PredicateBuilder::new()
        .like_right(username.is_some(), User::USERNAME, username.unwrap_or_default())
        .when_some(min_id, |b, id| b.greater_than_or_equal(true, User::ID, id));
    assert_eq!(ids(b), vec![2]);
}

// ============================================================================
// Other value kinds
// ============================================================================

#[test]
fn enum_attributes() {
    let b = PredicateBuilder::new().equal(true, User::ROLE, sift::Operand::from_enum(&Role::Admin));
    assert_eq!(ids(b), vec![1]);

    let b = PredicateBuilder::new().is_in(
        true,
        User::ROLE,
        [Role::Admin, Role::Member].iter().map(sift::Operand::from_enum),
    );
    assert_eq!(count(b), 4);
}

#[test]
fn timestamp_attributes() {
    let b = PredicateBuilder::new().between(
        true,
        User::JOINED,
        Timestamp::from_millis(2_000),
        Timestamp::from_secs(3),
    );
    assert_eq!(ids(b), vec![2, 3]);

    let joined: i64 = 3_000;
    let b = PredicateBuilder::new().greater_than_or_equal(
        true,
        User::JOINED,
        sift::Operand::from_timestamp(&joined),
    );
    assert_eq!(ids(b), vec![3, 4]);

    let cutoff = std::time::UNIX_EPOCH + std::time::Duration::from_secs(2);
    let b = PredicateBuilder::new().less_than(
        true,
        User::JOINED,
        sift::Operand::from_timestamp(&cutoff),
    );
    assert_eq!(ids(b), vec![1]);
}

#[test]
fn bool_attributes() {
    assert_eq!(ids(PredicateBuilder::new().equal(true, User::ACTIVE, true)), vec![1, 3]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unknown_attribute() {
    let users = users();
    let filter = PredicateBuilder::new().equal(true, "password_hash", "x").build();
    let err = User::find_all(&users, &filter).unwrap_err();
    assert!(matches!(err, SiftError::UnknownAttribute { attribute } if attribute == "password_hash"));
}

#[test]
fn type_mismatch() {
    let users = users();
    let filter = PredicateBuilder::new().equal(true, User::ID, "one").build();
    let err = User::find_all(&users, &filter).unwrap_err();
    assert_eq!(
        err.to_string(),
        "type mismatch on 'id': filter expects text, record has number"
    );
}

#[test]
fn like_on_number_is_invalid() {
    let users = users();
    let filter = PredicateBuilder::new().like(true, User::ID, "1").build();
    let err = User::find_all(&users, &filter).unwrap_err();
    assert!(matches!(
        err,
        SiftError::InvalidOperator {
            op: "LIKE",
            value_type: "number"
        }
    ));
}

#[test]
fn ordering_on_bool_is_invalid() {
    let users = users();
    let filter = PredicateBuilder::new().greater_than(true, User::ACTIVE, false).build();
    let err = User::find_all(&users, &filter).unwrap_err();
    assert!(matches!(err, SiftError::InvalidOperator { op: ">", .. }));
}

#[test]
fn builder_never_fails() {
    // Nonsense filters build fine; problems surface on evaluation.
    let filter = PredicateBuilder::new()
        .greater_than(true, "nope", true)
        .like(true, "", "")
        .build();
    assert_eq!(filter.len(), 2);
}
