use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, fixtures};
use tydb::{Record, Value};

#[test]
fn raw_query_returns_untyped_rows() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.inner, Record::new().set("value", true)));
    assert_ok!(session.create(f.inner, Record::new()));

    let rows = assert_ok!(assert_ok!(session.raw(
        r#"SELECT "key", "value" FROM "inner" WHERE "key" > ?1 ORDER BY "key""#,
        &[Value::I64(0)]
    ))
    .collect_vec());

    // Booleans come back as stored
    assert_eq!(
        rows,
        [
            vec![Value::I64(1), Value::I64(1)],
            vec![Value::I64(2), Value::I64(0)]
        ]
    );
}

#[test]
fn raw_failure_carries_the_sql() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    let err = assert_err!(session.raw("SELECT * FROM missing", &[]));
    assert!(err.is_execution_failed());
    assert_eq!(err.sql(), Some("SELECT * FROM missing"));
    assert!(err.root().is_driver());
}

#[test]
fn result_replays_after_first_pass() {
    let f = fixtures::notes();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.bulk_create(
        f.m,
        &["text"],
        vec![vec!["a".into()], vec!["b".into()]]
    ));

    let mut result = assert_ok!(session.select(f.m));

    let first_pass: Vec<_> = result.by_ref().map(|row| assert_ok!(row)).collect();
    assert_eq!(first_pass.len(), 2);
    assert!(result.is_done());

    let replay = assert_ok!(result.collect_vec());
    assert_eq!(replay, first_pass);
    assert_eq!(assert_ok!(result.buffered()).len(), 2);
}

#[test]
fn buffer_is_unavailable_mid_iteration() {
    let f = fixtures::notes();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.bulk_create(
        f.m,
        &["text"],
        vec![vec!["a".into()], vec!["b".into()]]
    ));

    let mut result = assert_ok!(session.select(f.m));
    assert_ok!(result.next().unwrap());

    let err = assert_err!(result.collect_vec());
    assert_eq!(
        err.to_string(),
        "invalid statement: initial result iteration still in progress"
    );

    assert_ok!(result.next().unwrap());
    assert!(result.next().is_none());
    assert_eq!(assert_ok!(result.collect_vec()).len(), 2);
}
