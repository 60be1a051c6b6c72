use pretty_assertions::assert_eq;
use tests::{assert_err, assert_none, assert_ok, fixtures};
use tydb::{Expr, Query, Record, Value};

#[test]
fn get_reports_zero_matches() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    let err = assert_err!(session.get(f.inner));
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "record not found: table `Inner`");
}

#[test]
fn get_reports_multiple_matches() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.inner, Record::new()));
    assert_ok!(session.create(f.inner, Record::new()));

    let err = assert_err!(session.get(f.inner));
    assert!(err.is_too_many_records());
}

#[test]
fn get_by_returned_key_round_trips() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);
    let key = f.schema.field_by_name(f.inner, "key").unwrap();

    assert_ok!(session.create(f.inner, Record::new().set("value", true)));
    let id = assert_ok!(session.create(f.inner, Record::new())).unwrap();

    let inner = assert_ok!(session.get(Query::table(f.inner).filter(key.eq(id))));
    assert_eq!(inner.key(), Some(&Value::I64(id)));
    assert_eq!(inner.get("value").unwrap(), &Value::Bool(false));
}

#[test]
fn first_is_absent_without_matches() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);
    let value = f.schema.field_by_name(f.inner, "value").unwrap();

    assert_none!(assert_ok!(session.first(f.inner)));

    assert_ok!(session.create(f.inner, Record::new()));
    assert_ok!(session.create(f.inner, Record::new().set("value", true)));

    let first = assert_ok!(session.first(f.inner)).unwrap();
    assert_eq!(first.key(), Some(&Value::I64(1)));

    let first = assert_ok!(session.first(Query::table(f.inner).filter(value.eq(true)))).unwrap();
    assert_eq!(first.key(), Some(&Value::I64(2)));

    let never = Expr::and(value.eq(true), value.eq(false));
    assert_none!(assert_ok!(session.first(Query::table(f.inner).filter(never))));
}

#[test]
fn limit_and_offset_page_through_rows() {
    let f = fixtures::notes();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.bulk_create(
        f.m,
        &["text"],
        (0..5).map(|n| vec![Value::from(n.to_string())])
    ));

    let page: Vec<_> = assert_ok!(
        assert_ok!(session.select(Query::table(f.m).offset(1).limit(2))).collect_vec()
    )
    .iter()
    .map(|row| row.get("text").unwrap().clone())
    .collect();
    assert_eq!(page, [Value::from("1"), Value::from("2")]);

    let tail = assert_ok!(assert_ok!(session.select(Query::table(f.m).offset(3))).collect_vec());
    assert_eq!(tail.len(), 2);
}
