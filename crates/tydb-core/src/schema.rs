mod builder;
pub use builder::{Attr, Builder, FieldDef, RefDef, TableBuilder};

mod field;
pub use field::{DefaultPolicy, Field, FieldId, FieldTy};

mod name;

mod path;
pub use path::{Join, JoinPath};

mod reference;
pub use reference::{Collection, CollectionId, Reference, ReferenceId};

mod table;
pub use table::{Table, TableId};

use crate::{Error, Result};

/// Immutable registry of every table, field, reference and collection.
///
/// Built once through [`Builder`]; all items are addressed by their ids.
#[derive(Debug, Default)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub fields: Vec<Field>,
    pub references: Vec<Reference>,
    pub collections: Vec<Collection>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        &self.tables[id.into().0]
    }

    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.0]
    }

    pub fn reference(&self, id: impl Into<ReferenceId>) -> &Reference {
        &self.references[id.into().0]
    }

    pub fn collection(&self, id: CollectionId) -> &Collection {
        &self.collections[id.0]
    }

    /// Iterates a table's fields in declaration order.
    pub fn fields_of(&self, table: impl Into<TableId>) -> impl Iterator<Item = &Field> + '_ {
        self.table(table).fields.iter().map(|id| self.field(*id))
    }

    /// Finds a table by its type name or SQL name.
    pub fn table_by_name(&self, name: &str) -> Result<&Table> {
        self.tables
            .iter()
            .find(|table| table.type_name == name || table.name == name)
            .ok_or_else(|| Error::invalid_statement(format!("no table named `{name}`")))
    }

    pub fn field_by_name(&self, table: impl Into<TableId>, name: &str) -> Result<&Field> {
        let table = self.table(table);
        self.fields_of(table)
            .find(|field| field.name == name)
            .ok_or_else(|| Error::field_not_found(&table.type_name, name))
    }

    pub fn reference_by_name(&self, table: impl Into<TableId>, name: &str) -> Result<&Reference> {
        let table = self.table(table);
        table
            .references
            .iter()
            .map(|id| self.reference(*id))
            .find(|reference| reference.name == name)
            .ok_or_else(|| Error::field_not_found(&table.type_name, name))
    }

    pub fn collection_by_name(&self, table: impl Into<TableId>, name: &str) -> Result<&Collection> {
        let table = self.table(table);
        table
            .collections
            .iter()
            .map(|id| self.collection(*id))
            .find(|collection| collection.name == name)
            .ok_or_else(|| Error::field_not_found(&table.type_name, name))
    }

    /// The table's primary key field.
    pub fn primary_key(&self, table: impl Into<TableId>) -> Option<&Field> {
        self.table(table).primary_key.map(|id| self.field(id))
    }

    /// `Type.attribute` form of a field, used in messages.
    pub fn field_path(&self, id: FieldId) -> String {
        let field = self.field(id);
        format!("{}.{}", self.table(field.owner).type_name, field.name)
    }
}
