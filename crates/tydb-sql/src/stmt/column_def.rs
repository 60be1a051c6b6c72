use tydb_core::schema::{DefaultPolicy, Field, FieldId};
use tydb_core::stmt::Value;

/// One column of a `CREATE TABLE`.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Field the column stores; the dialect derives the type from it
    pub field: FieldId,

    pub name: String,

    pub nullable: bool,

    pub default: Option<ColumnDefault>,
}

/// Default clause of a column definition.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDefault {
    /// A literal, already encoded for storage
    Value(Value),

    /// The dialect's current-timestamp function
    Now,
}

impl ColumnDef {
    pub fn from_schema(field: &Field) -> ColumnDef {
        let default = match &field.default {
            DefaultPolicy::Value(value) => Some(ColumnDefault::Value(field.encode(value.clone()))),
            DefaultPolicy::Now => Some(ColumnDefault::Now),
            DefaultPolicy::None | DefaultPolicy::Server => None,
        };

        ColumnDef {
            field: field.id,
            name: field.name.clone(),
            nullable: field.nullable,
            default,
        }
    }
}
