use pretty_assertions::assert_eq;
use tests::{assert_ok, fixtures};
use tydb::{Binding, Joins, Query, Record, Value};

fn grow(session: &mut tydb::Session<tydb_driver_sqlite::Connection>, table: tydb::schema::TableId) {
    // 1 <- 2 <- 3, plus a second root 4
    assert_ok!(session.create(table, Record::new()));
    assert_ok!(session.create(table, Record::new().set("parent_id", 1)));
    assert_ok!(session.create(table, Record::new().set("parent_id", 2)));
    assert_ok!(session.create(table, Record::new()));
}

#[test]
fn auto_join_follows_self_reference_once() {
    let f = fixtures::tree();
    let mut session = tests::session(&f.schema);
    grow(&mut session, f.node);

    let id = f.schema.field_by_name(f.node, "id").unwrap();
    let leaf = assert_ok!(session.get(Query::table(f.node).filter(id.eq(3)).auto_join()));

    let parent = leaf.related("parent").unwrap().unwrap();
    assert_eq!(parent.key(), Some(&Value::I64(2)));
    assert_eq!(parent.reference("parent").unwrap(), &Binding::Unfetched);
    assert_eq!(leaf.to_string(), "Node(id=3, parent_id=2, parent=Node(id=2, parent_id=1))");
}

#[test]
fn root_binds_absent_parent() {
    let f = fixtures::tree();
    let mut session = tests::session(&f.schema);
    grow(&mut session, f.node);

    let id = f.schema.field_by_name(f.node, "id").unwrap();
    let root = assert_ok!(session.get(Query::table(f.node).filter(id.eq(4)).auto_join()));

    assert_eq!(root.reference("parent").unwrap(), &Binding::Fetched(None));
    assert_eq!(root.to_string(), "Node(id=4, parent_id=null, parent=null)");
}

#[test]
fn children_collection() {
    let f = fixtures::tree();
    let mut session = tests::session(&f.schema);
    grow(&mut session, f.node);

    let root = assert_ok!(session.get(
        Query::table(f.node).filter(f.schema.field_by_name(f.node, "id").unwrap().eq(1))
    ));
    let children = assert_ok!(assert_ok!(session.select(assert_ok!(root.collection("children")))).collect_vec());
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].key(), Some(&Value::I64(2)));

    let leaf = assert_ok!(session.get(
        Query::table(f.node).filter(f.schema.field_by_name(f.node, "id").unwrap().eq(3))
    ));
    let none = assert_ok!(assert_ok!(session.select(assert_ok!(leaf.collection("children")))).collect_vec());
    assert!(none.is_empty());
}

#[test]
fn load_walks_one_level_at_a_time() {
    let f = fixtures::tree();
    let mut session = tests::session(&f.schema);
    grow(&mut session, f.node);

    let id = f.schema.field_by_name(f.node, "id").unwrap();
    let mut leaf = assert_ok!(session.get(Query::table(f.node).filter(id.eq(3))));

    let mut parent = assert_ok!(session.load_with(&mut leaf, "parent", Joins::None)).unwrap();
    assert_eq!(parent.key(), Some(&Value::I64(2)));

    let root = assert_ok!(session.load(&mut parent, "parent")).unwrap();
    assert_eq!(root.key(), Some(&Value::I64(1)));
    assert_eq!(leaf.related("parent").unwrap(), Some(&parent));
}
