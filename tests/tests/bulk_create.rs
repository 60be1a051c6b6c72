use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, fixtures};
use tydb::{dialect, Session, Value};
use tydb_driver_sqlite::Sqlite;

#[test]
fn bulk_rows_keep_insertion_order() {
    let f = fixtures::notes();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.bulk_create(
        f.m,
        &["text"],
        vec![vec![Value::Null], vec!["Text".into()]]
    ));

    let rows = assert_ok!(assert_ok!(session.select(f.m)).collect_vec());
    let rendered: Vec<_> = rows.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["M(id=1, text=null)", "M(id=2, text='Text')"]);
}

#[test]
fn bulk_create_without_rows_is_a_no_op() {
    let f = fixtures::notes();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.bulk_create(f.m, &["text"], Vec::<Vec<Value>>::new()));
    assert!(assert_ok!(session.first(f.m)).is_none());
}

#[test]
fn omitted_server_default_is_a_usage_error() {
    let f = fixtures::notes();
    let mut session = tests::session(&f.schema);

    let err = assert_err!(session.bulk_create(
        f.m,
        &["id", "text"],
        vec![vec![Value::Null, "a".into()]]
    ));
    assert!(err.is_invalid_statement());
    assert_eq!(
        err.to_string(),
        "invalid statement: can't omit values during bulk insert"
    );
}

#[test]
fn explicit_keys_are_stored() {
    let f = fixtures::notes();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.bulk_create(
        f.m,
        &["id", "text"],
        vec![vec![10.into(), "a".into()], vec![20.into(), "b".into()]]
    ));

    let keys: Vec<_> = assert_ok!(assert_ok!(session.select(f.m)).collect_vec())
        .iter()
        .map(|row| row.key().cloned())
        .collect();
    assert_eq!(keys, [Some(Value::I64(10)), Some(Value::I64(20))]);
}

#[test]
fn unknown_column_is_reported() {
    let f = fixtures::notes();
    let conn = assert_ok!(Sqlite::in_memory().connect());
    let mut session = Session::builder()
        .dialect(dialect::Sqlite)
        .connect_blocking(f.schema.clone(), conn);

    let err = assert_err!(session.bulk_create(f.m, &["body"], vec![vec!["x".into()]]));
    assert!(err.is_field_not_found());
    assert_eq!(err.to_string(), "field not found: M.body");
}
