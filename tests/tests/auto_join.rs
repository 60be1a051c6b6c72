use pretty_assertions::assert_eq;
use tests::{assert_ok, fixtures};
use tydb::{Binding, Query, Record, Value};

#[test]
fn auto_join_decodes_nested_instance() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    let inner_key = assert_ok!(session.create(f.inner, Record::new()));
    assert_eq!(inner_key, Some(1));

    let outer_key = assert_ok!(session.create(f.outer, Record::new().set("inner_key", 1)));
    assert_eq!(outer_key, Some(1));

    let rows = assert_ok!(assert_ok!(session.select(Query::table(f.outer).auto_join())).collect_vec());
    assert_eq!(rows.len(), 1);

    let outer = &rows[0];
    assert_eq!(outer.get("key").unwrap(), &Value::I64(1));

    let inner = outer.related("inner").unwrap().unwrap();
    assert_eq!(inner.get("key").unwrap(), &Value::I64(1));
    assert_eq!(inner.get("value").unwrap(), &Value::Bool(false));
    assert_eq!(
        outer.to_string(),
        "Outer(key=1, inner_key=1, inner=Inner(key=1, value=false))"
    );
}

#[test]
fn select_without_joins_leaves_references_unfetched() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.inner, Record::new().set("value", true)));
    assert_ok!(session.create(f.outer, Record::new().set("inner_key", 1)));

    let outer = assert_ok!(session.get(f.outer));
    assert_eq!(outer.reference("inner").unwrap(), &Binding::Unfetched);
}

#[test]
fn related_instance_stores_its_key() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.inner, Record::new().set("value", true)));
    let inner = assert_ok!(session.get(f.inner));

    assert_ok!(session.create(f.outer, Record::new().relate("inner", &inner)));

    let outer = assert_ok!(session.get(Query::table(f.outer).auto_join()));
    assert_eq!(outer.get("inner_key").unwrap(), &Value::I64(1));
    assert_eq!(outer.related("inner").unwrap(), Some(&inner));
}

#[test]
fn explicit_join_path() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);
    let inner_ref = f.schema.reference_by_name(f.outer, "inner").unwrap().id;

    assert_ok!(session.create(f.inner, Record::new()));
    assert_ok!(session.create(f.outer, Record::new().set("inner_key", 1)));

    let outer = assert_ok!(session.get(Query::table(f.outer).join(inner_ref)));
    assert!(outer.reference("inner").unwrap().is_fetched());
}
