use pretty_assertions::assert_eq;
use tests::{assert_ok, fixtures};
use tydb::{Binding, Query, Record, Value};

#[test]
fn missing_related_row_decodes_as_absent() {
    let f = fixtures::family();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.child, Record::new().set("label", "orphan")));

    let child = assert_ok!(session.get(Query::table(f.child).auto_join()));
    assert_eq!(child.get("parent_id").unwrap(), &Value::Null);
    assert_eq!(child.reference("parent").unwrap(), &Binding::Fetched(None));
    assert_eq!(
        child.to_string(),
        "Child(id=1, parent_id=null, label='orphan', parent=null)"
    );
}

#[test]
fn joined_and_unjoined_rows_side_by_side() {
    let f = fixtures::family();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.parent, Record::new().set("name", "p")));
    assert_ok!(session.create(
        f.child,
        Record::new().set("label", "a").set("parent_id", 1)
    ));
    assert_ok!(session.create(f.child, Record::new().set("label", "b")));

    let children = assert_ok!(
        assert_ok!(session.select(Query::table(f.child).auto_join())).collect_vec()
    );

    let parents: Vec<_> = children
        .iter()
        .map(|child| {
            child
                .related("parent")
                .unwrap()
                .map(|parent| parent.get("name").unwrap().clone())
        })
        .collect();
    assert_eq!(parents, [Some(Value::from("p")), None]);
}

#[test]
fn load_of_null_foreign_key_is_absent() {
    let f = fixtures::family();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.child, Record::new().set("label", "orphan")));
    let mut child = assert_ok!(session.get(f.child));

    assert_eq!(assert_ok!(session.load(&mut child, "parent")), None);
    assert_eq!(child.reference("parent").unwrap(), &Binding::Fetched(None));
}
