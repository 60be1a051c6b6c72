use super::*;

use tydb_core::schema::{Schema, TableId};

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions, in field declaration order
    pub columns: Vec<ColumnDef>,

    /// Primary key column name
    pub primary_key: Option<String>,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,
}

impl Statement {
    /// Creates a table if it does not already exist.
    pub fn create_table(schema: &Schema, table: TableId) -> Self {
        let table = schema.table(table);

        CreateTable {
            name: table.name.clone(),
            columns: schema.fields_of(table).map(ColumnDef::from_schema).collect(),
            primary_key: schema.primary_key(table).map(|field| field.name.clone()),
            if_not_exists: true,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
