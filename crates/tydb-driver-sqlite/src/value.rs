use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};
use tydb_core::{err, stmt::Value as CoreValue, Error, Result};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core TyDB value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Reads the column at `index` of a SQLite row.
    ///
    /// SQLite has no boolean or timestamp storage class; those come back as
    /// integers and text and are decoded by the field that selected them.
    pub fn from_sql(row: &Row<'_>, index: usize) -> Result<Self> {
        let value = row.get_ref(index).map_err(Error::driver)?;

        let core_value = match value {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(value) => CoreValue::I64(value),
            ValueRef::Real(value) => CoreValue::F64(value),
            ValueRef::Text(value) => {
                CoreValue::String(std::str::from_utf8(value).map_err(Error::driver)?.to_owned())
            }
            ValueRef::Blob(_) => {
                return Err(err!("column {index} holds a blob, which has no TyDB value"))
            }
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match &self.0 {
            CoreValue::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            CoreValue::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            CoreValue::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            CoreValue::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            CoreValue::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            CoreValue::Timestamp(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_rfc3339()))),
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
