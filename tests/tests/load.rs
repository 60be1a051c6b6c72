use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, fixtures};
use tydb::{Binding, Joins, Record, Value};

#[test]
fn load_fetches_and_caches_reference() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.inner, Record::new().set("value", true)));
    assert_ok!(session.create(f.outer, Record::new().set("inner_key", 1)));

    let mut outer = assert_ok!(session.get(f.outer));
    assert_eq!(outer.reference("inner").unwrap(), &Binding::Unfetched);

    let inner = assert_ok!(session.load(&mut outer, "inner")).unwrap();
    assert_eq!(inner.get("value").unwrap(), &Value::Bool(true));
    assert_eq!(outer.related("inner").unwrap(), Some(&inner));

    // Served from the binding once fetched
    assert_ok!(session.destroy(&[f.inner]));
    let cached = assert_ok!(session.load(&mut outer, "inner")).unwrap();
    assert_eq!(cached, inner);
}

#[test]
fn load_of_dangling_required_reference_fails() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.outer, Record::new().set("inner_key", 7)));
    let mut outer = assert_ok!(session.get(f.outer));

    let err = assert_err!(session.load(&mut outer, "inner"));
    assert!(err.is_record_not_found());
    assert_eq!(
        err.to_string(),
        "record not found: `Outer.inner` points at a missing row"
    );
    assert_eq!(outer.reference("inner").unwrap(), &Binding::Unfetched);
}

#[test]
fn load_of_dangling_optional_reference_is_absent() {
    let f = fixtures::family();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(
        f.child,
        Record::new().set("label", "x").set("parent_id", 9)
    ));
    let mut child = assert_ok!(session.get(f.child));

    assert_eq!(assert_ok!(session.load(&mut child, "parent")), None);
}

#[test]
fn load_with_joins_related_references() {
    let f = fixtures::tree();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.node, Record::new()));
    assert_ok!(session.create(f.node, Record::new().set("parent_id", 1)));
    assert_ok!(session.create(f.node, Record::new().set("parent_id", 2)));

    let id = f.schema.field_by_name(f.node, "id").unwrap();
    let mut leaf = assert_ok!(session.get(tydb::Query::table(f.node).filter(id.eq(3))));

    let parent = assert_ok!(session.load_with(&mut leaf, "parent", Joins::Auto)).unwrap();
    assert_eq!(parent.key(), Some(&Value::I64(2)));

    let grandparent = parent.related("parent").unwrap().unwrap();
    assert_eq!(grandparent.key(), Some(&Value::I64(1)));
    assert_eq!(grandparent.reference("parent").unwrap(), &Binding::Unfetched);
}

#[test]
fn unknown_reference_name() {
    let f = fixtures::inner_outer();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.inner, Record::new()));
    let mut inner = assert_ok!(session.get(f.inner));

    let err = assert_err!(session.load(&mut inner, "outer"));
    assert!(err.is_field_not_found());
}
