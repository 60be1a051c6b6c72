use crate::query::BoundCollection;

use tydb_core::{
    schema::{FieldId, ReferenceId, Table, TableId},
    stmt::Value,
    Error, Result, Schema,
};

use std::{fmt, sync::Arc};

/// One row of a table, decoded into application values.
///
/// Field values are stored in the table's declaration order. Each reference
/// declared on the table carries a [`Binding`] that starts out unfetched and
/// is filled in by joins or by an explicit `load`.
#[derive(Clone)]
pub struct Instance {
    schema: Arc<Schema>,
    table: TableId,
    values: Vec<Value>,
    bindings: Vec<Binding>,
}

/// Fetch state of a reference on an [`Instance`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Binding {
    /// Nothing has been fetched yet
    #[default]
    Unfetched,

    /// The related row was fetched; `None` means no row matched.
    Fetched(Option<Box<Instance>>),
}

impl Binding {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Binding::Fetched(_))
    }

    /// The related instance, if one was fetched.
    pub fn related(&self) -> Option<&Instance> {
        match self {
            Binding::Fetched(Some(instance)) => Some(instance),
            _ => None,
        }
    }
}

impl Instance {
    /// Decodes a row slice holding one value per field of `table`.
    pub(crate) fn from_row(schema: Arc<Schema>, table: TableId, row: Vec<Value>) -> Result<Instance> {
        let decl = schema.table(table);

        if row.len() != decl.fields.len() {
            return Err(Error::invalid_statement(format!(
                "row for `{}` has {} values, expected {}",
                decl.type_name,
                row.len(),
                decl.fields.len()
            )));
        }

        let values = decl
            .fields
            .iter()
            .zip(row)
            .map(|(id, value)| schema.field(*id).decode(value))
            .collect::<Result<Vec<_>>>()?;

        let bindings = vec![Binding::Unfetched; decl.references.len()];

        Ok(Instance {
            table,
            values,
            bindings,
            schema,
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn table_id(&self) -> TableId {
        self.table
    }

    pub fn table(&self) -> &Table {
        self.schema.table(self.table)
    }

    /// All field values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of a field by name.
    pub fn get(&self, name: &str) -> Result<&Value> {
        let field = self.schema.field_by_name(self.table, name)?;
        Ok(&self.values[field.index])
    }

    /// Assigns a field by name.
    ///
    /// Changing a foreign key resets the references that go through it.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let field = self.schema.field_by_name(self.table, name)?;
        field.check(&value)?;

        let (index, id) = (field.index, field.id);
        self.values[index] = value;

        for reference_id in &self.schema.table(self.table).references {
            let reference = self.schema.reference(*reference_id);
            if reference.field == id {
                self.bindings[reference.index] = Binding::Unfetched;
            }
        }

        Ok(())
    }

    /// Value of a field by id, when the field belongs to this table.
    pub fn value(&self, field: FieldId) -> Option<&Value> {
        self.table()
            .field_index(field)
            .map(|index| &self.values[index])
    }

    /// The primary key value, when the table has one.
    pub fn key(&self) -> Option<&Value> {
        self.table().primary_key.and_then(|pk| self.value(pk))
    }

    /// Fetch state of a reference by name.
    pub fn reference(&self, name: &str) -> Result<&Binding> {
        let reference = self.schema.reference_by_name(self.table, name)?;
        Ok(&self.bindings[reference.index])
    }

    /// The fetched instance behind a reference, if any.
    pub fn related(&self, name: &str) -> Result<Option<&Instance>> {
        self.reference(name).map(Binding::related)
    }

    /// A collection of this instance, bound to its key so it can be queried.
    pub fn collection(&self, name: &str) -> Result<BoundCollection> {
        let collection = self.schema.collection_by_name(self.table, name)?;
        let reference = self.schema.reference(collection.reference);
        let field = self.schema.field(reference.field);

        let Some(foreign) = field.foreign else {
            return Err(Error::invalid_schema(format!(
                "reference field `{}` not foreign",
                self.schema.field_path(field.id)
            )));
        };

        let value = self.value(foreign).cloned().ok_or_else(|| {
            Error::field_not_found(&self.table().type_name, &self.schema.field(foreign).name)
        })?;

        Ok(BoundCollection::new(collection.id, value))
    }

    pub(crate) fn binding(&self, reference: ReferenceId) -> Option<&Binding> {
        self.reference_index(reference)
            .map(|index| &self.bindings[index])
    }

    pub(crate) fn binding_mut(&mut self, reference: ReferenceId) -> Option<&mut Binding> {
        self.reference_index(reference)
            .map(|index| &mut self.bindings[index])
    }

    /// Records the outcome of fetching `reference`.
    pub(crate) fn bind(&mut self, reference: ReferenceId, related: Option<Instance>) {
        if let Some(binding) = self.binding_mut(reference) {
            *binding = Binding::Fetched(related.map(Box::new));
        }
    }

    fn reference_index(&self, reference: ReferenceId) -> Option<usize> {
        let decl = self.schema.reference(reference);
        (decl.owner == self.table).then_some(decl.index)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        if self.table != other.table {
            return false;
        }

        match (self.key(), other.key()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => self.values == other.values,
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table();
        write!(f, "{}(", table.type_name)?;

        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| {
            if std::mem::take(&mut first) {
                Ok(())
            } else {
                f.write_str(", ")
            }
        };

        for (id, value) in table.fields.iter().zip(&self.values) {
            sep(f)?;
            write!(f, "{}={}", self.schema.field(*id).name, value)?;
        }

        for (id, binding) in table.references.iter().zip(&self.bindings) {
            let Binding::Fetched(related) = binding else {
                continue;
            };

            sep(f)?;
            write!(f, "{}=", self.schema.reference(*id).name)?;
            match related {
                Some(related) => write!(f, "{related}")?,
                None => f.write_str("null")?,
            }
        }

        f.write_str(")")
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table();
        let mut s = f.debug_struct(&table.type_name);

        for (id, value) in table.fields.iter().zip(&self.values) {
            s.field(&self.schema.field(*id).name, value);
        }

        for (id, binding) in table.references.iter().zip(&self.bindings) {
            if binding.is_fetched() {
                s.field(&self.schema.reference(*id).name, binding);
            }
        }

        s.finish()
    }
}
