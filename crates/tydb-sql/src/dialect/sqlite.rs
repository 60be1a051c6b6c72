use super::{base_column_type, Dialect};

use tydb_core::schema::{Field, FieldTy, Schema};

use std::borrow::Cow;

/// SQLite.
///
/// SQLite is typeless, so column types mostly document the expected kind.
/// It has no per-value `DEFAULT` keyword in `VALUES`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn column_type(&self, _schema: &Schema, field: &Field) -> Cow<'static, str> {
        match field.ty {
            FieldTy::DateTime => Cow::Borrowed("TIMESTAMP"),
            ty => Cow::Borrowed(base_column_type(ty)),
        }
    }

    // UTC
    fn datetime_default_now(&self) -> Option<&'static str> {
        Some("CURRENT_TIMESTAMP")
    }

    fn server_default(&self) -> Option<&'static str> {
        None
    }

    fn write_placeholder(&self, dst: &mut String, position: usize) {
        dst.push('?');
        dst.push_str(&position.to_string());
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        Some("-1")
    }
}
