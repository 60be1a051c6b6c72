use super::{CollectionId, FieldId, ReferenceId};

use std::fmt;

/// A table in the schema.
#[derive(Debug, Clone)]
pub struct Table {
    /// Uniquely identifies the table within the schema
    pub id: TableId,

    /// Name of the declaring type, as given to the builder
    pub type_name: String,

    /// SQL name of the table
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<FieldId>,

    /// Foreign-key references declared on this table
    pub references: Vec<ReferenceId>,

    /// Reverse collections created by references targeting this table
    pub collections: Vec<CollectionId>,

    /// The table's primary key, if one was configured or inherited
    pub primary_key: Option<FieldId>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct TableId(pub usize);

impl Table {
    /// Position of `field` among this table's fields.
    pub fn field_index(&self, field: FieldId) -> Option<usize> {
        self.fields.iter().position(|id| *id == field)
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}

impl From<&Table> for TableId {
    fn from(value: &Table) -> Self {
        value.id
    }
}
