use super::{base_column_type, is_int_primary_key, Dialect};

use tydb_core::schema::{Field, FieldTy, Schema};

use std::borrow::Cow;

/// MySQL.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mysql;

impl Dialect for Mysql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn column_type(&self, schema: &Schema, field: &Field) -> Cow<'static, str> {
        if is_int_primary_key(schema, field) {
            return Cow::Borrowed("INTEGER AUTO_INCREMENT");
        }

        match (field.ty, field.size) {
            (FieldTy::Str, Some(size)) => Cow::Owned(format!("VARCHAR({size})")),
            // Microsecond precision
            (FieldTy::DateTime, _) => Cow::Borrowed("DATETIME(6)"),
            (ty, _) => Cow::Borrowed(base_column_type(ty)),
        }
    }

    fn datetime_default_now(&self) -> Option<&'static str> {
        Some("CURRENT_TIMESTAMP")
    }

    fn quote(&self) -> char {
        '`'
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        Some("18446744073709551615")
    }
}
