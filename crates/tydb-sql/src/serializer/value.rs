use super::{Formatter, Params, ToSql};

use crate::stmt::{ColumnDefault, InsertValue, Value};

/// A value written inline rather than bound, for DDL where engines do
/// not accept parameters.
pub(super) struct Literal<'a>(pub(super) &'a Value);

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}

impl ToSql for Literal<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.0 {
            Value::Null => f.dst.push_str("NULL"),
            Value::Bool(true) => f.dst.push_str("TRUE"),
            Value::Bool(false) => f.dst.push_str("FALSE"),
            Value::I64(v) => f.dst.push_str(&v.to_string()),
            Value::F64(v) => f.dst.push_str(&format!("{v:?}")),
            Value::String(v) => string_literal(f.dst, v),
            Value::Timestamp(v) => string_literal(f.dst, &v.to_rfc3339()),
        }
    }
}

impl ToSql for &ColumnDefault {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            ColumnDefault::Value(value) => fmt!(f, " DEFAULT " Literal(value)),
            ColumnDefault::Now => {
                if let Some(now) = f.serializer.dialect.datetime_default_now() {
                    fmt!(f, " DEFAULT " now);
                }
            }
        }
    }
}

impl ToSql for &InsertValue {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            InsertValue::Value(value) => fmt!(f, value),
            InsertValue::ServerDefault => {
                let keyword = f.serializer.dialect.server_default().unwrap_or("DEFAULT");
                fmt!(f, keyword);
            }
        }
    }
}

fn string_literal(dst: &mut String, value: &str) {
    dst.push('\'');
    dst.push_str(&value.replace('\'', "''"));
    dst.push('\'');
}
