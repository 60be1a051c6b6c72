use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, fixtures};
use tydb::{Record, Value};

#[test]
fn remove_by_primary_key() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    for _ in 0..3 {
        assert_ok!(session.create(f.inner, Record::new()));
    }

    let rows = assert_ok!(assert_ok!(session.select(f.inner)).collect_vec());
    assert_ok!(session.remove(&rows[..2]));

    let left = assert_ok!(session.get(f.inner));
    assert_eq!(left.key(), Some(&Value::I64(3)));
}

#[test]
fn delete_by_keys() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    for _ in 0..3 {
        assert_ok!(session.create(f.inner, Record::new()));
    }

    assert_ok!(session.delete(f.inner, [1, 3]));
    assert_ok!(session.delete(f.inner, Vec::<i64>::new()));

    let left = assert_ok!(session.get(f.inner));
    assert_eq!(left.key(), Some(&Value::I64(2)));
}

#[test]
fn remove_single_row_without_primary_key() {
    let f = fixtures::journal();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.bulk_create(
        f.log,
        &["msg", "level"],
        vec![vec!["a".into(), 1.into()], vec!["b".into(), 2.into()]]
    ));

    let rows = assert_ok!(assert_ok!(session.select(f.log)).collect_vec());
    assert_ok!(session.remove(&rows[1..]));

    let left = assert_ok!(session.get(f.log));
    assert_eq!(left.get("msg").unwrap(), &Value::from("a"));
}

#[test]
fn remove_many_rows_without_primary_key_fails() {
    let f = fixtures::journal();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.log, Record::new().set("msg", "a")));
    assert_ok!(session.create(f.log, Record::new().set("msg", "b")));

    let rows = assert_ok!(assert_ok!(session.select(f.log)).collect_vec());
    let err = assert_err!(session.remove(&rows));
    assert_eq!(
        err.to_string(),
        "invalid statement: can only delete single instance of table without primary key"
    );

    let err = assert_err!(session.delete(f.log, ["a"]));
    assert_eq!(err.to_string(), "invalid statement: table `Log` has no primary key");
}

#[test]
fn remove_rejects_mixed_tables() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.inner, Record::new()));
    assert_ok!(session.create(f.outer, Record::new().set("inner_key", 1)));

    let inner = assert_ok!(session.get(f.inner));
    let outer = assert_ok!(session.get(f.outer));

    let err = assert_err!(session.remove(&[inner, outer]));
    assert!(err.is_invalid_statement());
}
