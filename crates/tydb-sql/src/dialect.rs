//! Per-engine SQL metadata.
//!
//! A [`Dialect`] decides column type names, default-value syntax, identifier
//! quoting and placeholder style. Dialects are stateless and chosen once per
//! session.

mod generic;
pub use generic::Generic;

mod mysql;
pub use mysql::Mysql;

mod postgresql;
pub use postgresql::Postgresql;

mod sqlite;
pub use sqlite::Sqlite;

use tydb_core::{
    schema::{Field, FieldTy, Schema},
    Error, Result,
};

use std::{borrow::Cow, fmt::Debug};

pub trait Dialect: Debug + Send + Sync + 'static {
    /// Name used for logging and [`from_name`].
    fn name(&self) -> &'static str;

    /// Column type for `field`, ignoring nullability.
    fn column_type(&self, schema: &Schema, field: &Field) -> Cow<'static, str> {
        let _ = schema;
        Cow::Borrowed(base_column_type(field.ty))
    }

    /// SQL function returning the current timestamp, used as the column
    /// default of fields stamped with the current time.
    fn datetime_default_now(&self) -> Option<&'static str> {
        None
    }

    /// Keyword requesting the column default for one value of an insert.
    ///
    /// When `None`, columns left to the server must be omitted from the
    /// insert instead.
    fn server_default(&self) -> Option<&'static str> {
        Some("DEFAULT")
    }

    /// Character used to quote identifiers.
    fn quote(&self) -> char {
        '"'
    }

    /// Writes the placeholder for the parameter at 1-based `position`.
    fn write_placeholder(&self, dst: &mut String, position: usize) {
        let _ = position;
        dst.push('?');
    }

    /// Limit to pair with an offset when the query has no limit of its own,
    /// for engines that reject a bare `OFFSET`.
    fn unbounded_limit(&self) -> Option<&'static str> {
        None
    }

    /// Whether `ILIKE` is understood natively.
    fn supports_ilike(&self) -> bool {
        false
    }
}

/// Column type shared by every dialect unless it overrides the kind.
pub fn base_column_type(ty: FieldTy) -> &'static str {
    match ty {
        FieldTy::Int => "INTEGER",
        FieldTy::Float => "FLOAT",
        FieldTy::Bool => "BOOLEAN",
        FieldTy::Str => "TEXT",
        FieldTy::DateTime => "TIMESTAMP",
    }
}

/// Selects a dialect by name.
pub fn from_name(name: &str) -> Result<Box<dyn Dialect>> {
    match name {
        "generic" => Ok(Box::new(Generic)),
        "sqlite" => Ok(Box::new(Sqlite)),
        "postgresql" | "postgres" => Ok(Box::new(Postgresql)),
        "mysql" => Ok(Box::new(Mysql)),
        _ => Err(Error::invalid_statement(format!("unknown dialect `{name}`"))),
    }
}

/// True if `field` is its table's integer primary key.
pub(crate) fn is_int_primary_key(schema: &Schema, field: &Field) -> bool {
    field.ty == FieldTy::Int && schema.table(field.owner).primary_key == Some(field.id)
}
