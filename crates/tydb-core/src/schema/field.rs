use super::TableId;
use crate::{
    stmt::{Expr, ExprColumn, Operand, Value},
    Error, Result,
};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::fmt;

/// A column descriptor bound to one table attribute.
#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the schema
    pub id: FieldId,

    /// Table the field belongs to
    pub owner: TableId,

    /// Position of the field within the owning table's fields
    pub index: usize,

    /// Attribute name, which is also the column name
    pub name: String,

    /// Kind of value the field stores
    pub ty: FieldTy,

    /// True if the column accepts `NULL`
    pub nullable: bool,

    /// What to store when no value is supplied on insert
    pub default: DefaultPolicy,

    /// Maximum length for string columns, where the dialect honours it
    pub size: Option<u32>,

    /// The field this one holds a foreign key to
    pub foreign: Option<FieldId>,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct FieldId(pub usize);

/// Semantic kind of a field's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTy {
    Int,
    Float,
    Bool,
    Str,
    DateTime,
}

/// Policy for a field when an insert supplies no value.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultPolicy {
    /// A value is required.
    None,

    /// Let the database assign the value.
    Server,

    /// Stamp the current time on the client; `CURRENT_TIMESTAMP` in DDL.
    Now,

    /// Use this literal.
    Value(Value),
}

impl FieldTy {
    pub fn name(self) -> &'static str {
        match self {
            FieldTy::Int => "Int",
            FieldTy::Float => "Float",
            FieldTy::Bool => "Bool",
            FieldTy::Str => "Str",
            FieldTy::DateTime => "DateTime",
        }
    }

    /// Converts an application value into its stored form.
    ///
    /// Only timestamps change shape: they become RFC 3339 strings.
    pub fn encode(self, value: Value) -> Value {
        match (self, value) {
            (FieldTy::DateTime, Value::Timestamp(ts)) => Value::String(ts.to_rfc3339()),
            (FieldTy::Float, Value::I64(v)) => Value::F64(v as f64),
            (_, value) => value,
        }
    }

    /// Converts a stored value back into its application form.
    pub fn decode(self, value: Value) -> Result<Value> {
        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),
            (FieldTy::Int, Value::I64(v)) => Ok(Value::I64(v)),
            (FieldTy::Float, Value::F64(v)) => Ok(Value::F64(v)),
            (FieldTy::Float, Value::I64(v)) => Ok(Value::F64(v as f64)),
            (FieldTy::Bool, Value::Bool(v)) => Ok(Value::Bool(v)),
            (FieldTy::Bool, Value::I64(v)) => Ok(Value::Bool(v != 0)),
            (FieldTy::Str, Value::String(v)) => Ok(Value::String(v)),
            (FieldTy::DateTime, Value::Timestamp(v)) => Ok(Value::Timestamp(v)),
            (FieldTy::DateTime, Value::String(v)) => parse_timestamp(&v).map(Value::Timestamp),
            (ty, value) => Err(Error::type_conversion(value, ty.name())),
        }
    }

    /// Checks an application value is acceptable for this kind.
    pub fn check(self, value: &Value) -> Result<()> {
        let ok = matches!(
            (self, value),
            (_, Value::Null)
                | (FieldTy::Int, Value::I64(_))
                | (FieldTy::Float, Value::F64(_) | Value::I64(_))
                | (FieldTy::Bool, Value::Bool(_))
                | (FieldTy::Str, Value::String(_))
                | (FieldTy::DateTime, Value::Timestamp(_))
        );

        if ok {
            Ok(())
        } else {
            Err(Error::type_conversion(value.clone(), self.name()))
        }
    }
}

/// Parses RFC 3339, falling back to SQLite's `CURRENT_TIMESTAMP` format,
/// which is UTC without an offset.
fn parse_timestamp(src: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(src) {
        return Ok(ts);
    }

    let naive = NaiveDateTime::parse_from_str(src, "%Y-%m-%d %H:%M:%S%.f")?;
    Ok(naive.and_utc().fixed_offset())
}

impl Field {
    /// Column reference for this field, qualified by its table.
    pub fn column(&self) -> ExprColumn {
        ExprColumn::new(self.id)
    }

    /// Column reference for this field through a join alias.
    pub fn aliased(&self, alias: impl Into<String>) -> ExprColumn {
        ExprColumn::aliased(self.id, alias)
    }

    /// Encodes `value` for storage in this field.
    pub fn encode(&self, value: Value) -> Value {
        self.ty.encode(value)
    }

    /// Decodes a stored `value` read from this field's column.
    pub fn decode(&self, value: Value) -> Result<Value> {
        self.ty
            .decode(value)
            .map_err(|err| err.context(crate::err!("decoding field `{}`", self.name)))
    }

    /// Validates `value` against the field's kind and nullability.
    pub fn check(&self, value: &Value) -> Result<()> {
        if value.is_null() && !self.nullable {
            return Err(Error::invalid_statement(format!(
                "field `{}` is not nullable",
                self.name
            )));
        }

        self.ty.check(value)
    }

    pub fn eq(&self, rhs: impl Into<Operand>) -> Expr {
        Expr::eq(self, rhs)
    }

    pub fn ne(&self, rhs: impl Into<Operand>) -> Expr {
        Expr::ne(self, rhs)
    }

    pub fn lt(&self, rhs: impl Into<Operand>) -> Expr {
        Expr::lt(self, rhs)
    }

    pub fn le(&self, rhs: impl Into<Operand>) -> Expr {
        Expr::le(self, rhs)
    }

    pub fn gt(&self, rhs: impl Into<Operand>) -> Expr {
        Expr::gt(self, rhs)
    }

    pub fn ge(&self, rhs: impl Into<Operand>) -> Expr {
        Expr::ge(self, rhs)
    }

    pub fn in_list<I>(&self, list: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Expr::in_list(self, list)
    }

    pub fn like(&self, pattern: impl Into<Operand>) -> Expr {
        Expr::like(self, pattern)
    }

    pub fn ilike(&self, pattern: impl Into<Operand>) -> Expr {
        Expr::ilike(self, pattern)
    }

    pub fn is_null(&self) -> Expr {
        Expr::is_null(self)
    }

    pub fn is_not_null(&self) -> Expr {
        Expr::is_not_null(self)
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({})", self.0)
    }
}
