//! Schemas shared by the end-to-end tests.

use tydb::{
    schema::{FieldDef, RefDef, TableId},
    Schema,
};

use std::sync::Arc;

/// `Inner(key, value)` referenced by `Outer(key, inner_key)` through
/// `Outer.inner`, with the backref `Inner.outers`.
pub struct InnerOuter {
    pub schema: Arc<Schema>,
    pub inner: TableId,
    pub outer: TableId,
}

pub fn inner_outer() -> InnerOuter {
    let mut builder = Schema::builder();

    let key = builder.field(FieldDef::int().server_default());
    let value = builder.field(FieldDef::bool().default(false));
    let inner = assert_ok!(builder
        .table("Inner")
        .attr("key", key)
        .attr("value", value)
        .primary("key")
        .build());

    let outer_key = builder.field(FieldDef::int().server_default());
    let inner_key = builder.field(FieldDef::int().foreign(key));
    let inner_ref = builder.reference(RefDef::new(inner_key, inner).backref("outers"));
    let outer = assert_ok!(builder
        .table("Outer")
        .attr("key", outer_key)
        .attr("inner_key", inner_key)
        .attr("inner", inner_ref)
        .primary("key")
        .build());

    InnerOuter {
        schema: Arc::new(assert_ok!(builder.build())),
        inner,
        outer,
    }
}

/// `M(id, text)` with a nullable `text`.
pub struct Notes {
    pub schema: Arc<Schema>,
    pub m: TableId,
}

pub fn notes() -> Notes {
    let mut builder = Schema::builder();

    let id = builder.field(FieldDef::int().server_default());
    let text = builder.field(FieldDef::str().nullable());
    let m = assert_ok!(builder
        .table("M")
        .attr("id", id)
        .attr("text", text)
        .primary("id")
        .build());

    Notes {
        schema: Arc::new(assert_ok!(builder.build())),
        m,
    }
}

/// `Parent(id, name)` and `Child(id, parent_id, label)`, where a child's
/// parent is optional.
pub struct Family {
    pub schema: Arc<Schema>,
    pub parent: TableId,
    pub child: TableId,
}

pub fn family() -> Family {
    let mut builder = Schema::builder();

    let id = builder.field(FieldDef::int().server_default());
    let name = builder.field(FieldDef::str());
    let parent = assert_ok!(builder
        .table("Parent")
        .attr("id", id)
        .attr("name", name)
        .primary("id")
        .build());

    let child_id = builder.field(FieldDef::int().server_default());
    let parent_id = builder.field(FieldDef::int().nullable().foreign(id));
    let label = builder.field(FieldDef::str());
    let parent_ref = builder.reference(RefDef::new(parent_id, parent).backref("children"));
    let child = assert_ok!(builder
        .table("Child")
        .attr("id", child_id)
        .attr("parent_id", parent_id)
        .attr("parent", parent_ref)
        .attr("label", label)
        .primary("id")
        .build());

    Family {
        schema: Arc::new(assert_ok!(builder.build())),
        parent,
        child,
    }
}

/// `Node(id, parent_id)` pointing at itself through the deferred `parent`.
pub struct Tree {
    pub schema: Arc<Schema>,
    pub node: TableId,
}

pub fn tree() -> Tree {
    let mut builder = Schema::builder();

    let id = builder.field(FieldDef::int().server_default());
    let parent_id = builder.field(FieldDef::int().nullable().foreign(id));
    let node = assert_ok!(builder
        .table("Node")
        .attr("id", id)
        .attr("parent_id", parent_id)
        .deferred("parent")
        .primary("id")
        .build());

    let parent = builder.reference(RefDef::new(parent_id, node).backref("children"));
    assert_ok!(builder.assign(node, "parent", parent));

    Tree {
        schema: Arc::new(assert_ok!(builder.build())),
        node,
    }
}

/// `Event(id, title, at, until)` with a client-stamped `at`, and a
/// `Log(msg, level)` table without a primary key.
pub struct Journal {
    pub schema: Arc<Schema>,
    pub event: TableId,
    pub log: TableId,
}

pub fn journal() -> Journal {
    let mut builder = Schema::builder();

    let id = builder.field(FieldDef::int().server_default());
    let title = builder.field(FieldDef::str().size(40));
    let at = builder.field(FieldDef::datetime().default_now());
    let until = builder.field(FieldDef::datetime().nullable());
    let event = assert_ok!(builder
        .table("Event")
        .attr("id", id)
        .attr("title", title)
        .attr("at", at)
        .attr("until", until)
        .primary("id")
        .build());

    let msg = builder.field(FieldDef::str());
    let level = builder.field(FieldDef::int().default(0));
    let log = assert_ok!(builder
        .table("Log")
        .attr("msg", msg)
        .attr("level", level)
        .build());

    Journal {
        schema: Arc::new(assert_ok!(builder.build())),
        event,
        log,
    }
}
