use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, fixtures};
use tydb::{Query, Record, Value};

fn labels(rows: &[tydb::Instance]) -> Vec<Value> {
    rows.iter()
        .map(|row| row.get("label").unwrap().clone())
        .collect()
}

#[test]
fn collection_selects_owned_rows() {
    let f = fixtures::family();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.parent, Record::new().set("name", "a")));
    assert_ok!(session.create(f.parent, Record::new().set("name", "b")));

    for (label, parent) in [("a1", 1), ("b1", 2), ("a2", 1)] {
        assert_ok!(session.create(
            f.child,
            Record::new().set("label", label).set("parent_id", parent)
        ));
    }

    let parent = assert_ok!(session.get(Query::table(f.parent).filter(
        f.schema.field_by_name(f.parent, "name").unwrap().eq("a")
    )));
    let children = assert_ok!(parent.collection("children"));

    let rows = assert_ok!(assert_ok!(session.select(children)).collect_vec());
    assert_eq!(labels(&rows), [Value::from("a1"), Value::from("a2")]);
}

#[test]
fn collection_filter_is_anded() {
    let f = fixtures::family();
    let mut session = tests::session(&f.schema);
    let label = f.schema.field_by_name(f.child, "label").unwrap();

    assert_ok!(session.create(f.parent, Record::new().set("name", "a")));
    for name in ["x", "y"] {
        assert_ok!(session.create(
            f.child,
            Record::new().set("label", name).set("parent_id", 1)
        ));
    }

    let parent = assert_ok!(session.get(f.parent));
    let query = Query::from(assert_ok!(parent.collection("children"))).filter(label.eq("y"));

    let child = assert_ok!(session.get(query));
    assert_eq!(child.get("label").unwrap(), &Value::from("y"));
}

#[test]
fn collection_joins_back_to_owner() {
    let f = fixtures::family();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.parent, Record::new().set("name", "a")));
    assert_ok!(session.create(
        f.child,
        Record::new().set("label", "x").set("parent_id", 1)
    ));

    let parent = assert_ok!(session.get(f.parent));
    let query = Query::from(assert_ok!(parent.collection("children"))).auto_join();

    let child = assert_ok!(session.get(query));
    assert_eq!(child.related("parent").unwrap(), Some(&parent));
}

#[test]
fn unknown_collection_name() {
    let f = fixtures::family();
    let mut session = tests::session(&f.schema);

    assert_ok!(session.create(f.parent, Record::new().set("name", "a")));
    let parent = assert_ok!(session.get(f.parent));

    let err = assert_err!(parent.collection("siblings"));
    assert_eq!(err.to_string(), "field not found: Parent.siblings");
}
