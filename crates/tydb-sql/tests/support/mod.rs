#![allow(dead_code)]

use tydb_core::schema::{FieldDef, RefDef, Schema, TableId};
use tydb_core::stmt::{Expr, Value};
use tydb_sql::{Dialect, Serializer, Statement};

pub struct Fixture {
    pub schema: Schema,
    pub inner: TableId,
    pub outer: TableId,
    pub event: TableId,
    pub log: TableId,
}

pub fn fixture() -> Fixture {
    let mut builder = Schema::builder();

    let key = builder.field(FieldDef::int().server_default());
    let value = builder.field(FieldDef::bool().default(false));
    let inner = builder
        .table("Inner")
        .attr("key", key)
        .attr("value", value)
        .primary("key")
        .build()
        .unwrap();

    let outer_key = builder.field(FieldDef::int().server_default());
    let inner_key = builder.field(FieldDef::int().foreign(key));
    let inner_ref = builder.reference(RefDef::new(inner_key, inner));
    let outer = builder
        .table("Outer")
        .attr("key", outer_key)
        .attr("inner_key", inner_key)
        .attr("inner", inner_ref)
        .primary("key")
        .build()
        .unwrap();

    let id = builder.field(FieldDef::int());
    let at = builder.field(FieldDef::datetime().default_now());
    let title = builder.field(FieldDef::str().size(40).nullable());
    let event = builder
        .table("Event")
        .attr("id", id)
        .attr("at", at)
        .attr("title", title)
        .primary("id")
        .build()
        .unwrap();

    let msg = builder.field(FieldDef::str().nullable());
    let n = builder.field(FieldDef::int());
    let log = builder.table("Log").attr("msg", msg).attr("n", n).build().unwrap();

    Fixture {
        schema: builder.build().unwrap(),
        inner,
        outer,
        event,
        log,
    }
}

pub fn serialize(schema: &Schema, dialect: &dyn Dialect, stmt: impl Into<Statement>) -> (String, Vec<Value>) {
    let mut params = vec![];
    let sql = Serializer::new(schema, dialect).serialize(&stmt.into(), &mut params);
    (sql, params)
}

pub fn serialize_expr(schema: &Schema, dialect: &dyn Dialect, expr: &Expr) -> (String, Vec<Value>) {
    let mut params = vec![];
    let sql = Serializer::new(schema, dialect).serialize_expr(expr, &mut params);
    (sql, params)
}
