use super::{base_column_type, is_int_primary_key, Dialect};

use tydb_core::schema::{Field, FieldTy, Schema};

use std::borrow::Cow;

/// PostgreSQL.
#[derive(Debug, Default, Clone, Copy)]
pub struct Postgresql;

impl Dialect for Postgresql {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn column_type(&self, schema: &Schema, field: &Field) -> Cow<'static, str> {
        if is_int_primary_key(schema, field) {
            return Cow::Borrowed("SERIAL");
        }

        match field.ty {
            FieldTy::DateTime => Cow::Borrowed("TIMESTAMP WITH TIME ZONE"),
            ty => Cow::Borrowed(base_column_type(ty)),
        }
    }

    // Host's timezone
    fn datetime_default_now(&self) -> Option<&'static str> {
        Some("NOW()")
    }

    fn write_placeholder(&self, dst: &mut String, position: usize) {
        dst.push('$');
        dst.push_str(&position.to_string());
    }

    fn supports_ilike(&self) -> bool {
        true
    }
}
