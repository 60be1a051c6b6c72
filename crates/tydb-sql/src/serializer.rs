#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{comma, Delimited};

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;
mod value;

use crate::{stmt::Statement, Dialect};

use tydb_core::{
    schema::{FieldId, Schema, TableId},
    stmt::Expr,
};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which the statement is to be serialized
    schema: &'a Schema,

    /// Engine-specific syntax
    dialect: &'a dyn Dialect,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl<'a> Serializer<'a> {
    pub fn new(schema: &'a Schema, dialect: &'a dyn Dialect) -> Serializer<'a> {
        Serializer { schema, dialect }
    }

    /// Renders `stmt`, pushing literal values onto `params`.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Renders a standalone predicate, as it would appear in a `WHERE`.
    pub fn serialize_expr(&self, expr: &Expr, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        expr.to_sql(&mut fmt);
        ret
    }

    fn table_name(&self, id: TableId) -> Ident<&'a str> {
        Ident(&self.schema.table(id).name)
    }

    fn column_name(&self, id: FieldId) -> Ident<&'a str> {
        Ident(&self.schema.field(id).name)
    }
}
