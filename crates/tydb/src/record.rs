use crate::Instance;

use tydb_core::{
    schema::{DefaultPolicy, Field, FieldId, TableId},
    stmt::Value,
    Error, Result, Schema,
};
use tydb_sql::{stmt::InsertValue, Dialect};

use chrono::Local;
use indexmap::IndexMap;

/// Field values for one row to insert, keyed by attribute name.
///
/// Names may be field names or reference names. A reference name is given
/// the related [`Instance`] and stores that instance's key in the
/// reference's foreign key field.
#[derive(Debug, Clone, Default)]
pub struct Record {
    entries: IndexMap<String, Entry>,
}

#[derive(Debug, Clone)]
enum Entry {
    Value(Value),
    Instance(Instance),
}

/// What an insert stores for one field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Prepared {
    Value(InsertValue),

    /// Leave the column out and let the database fill it
    Omit,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// Sets a field value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Record {
        self.entries.insert(name.into(), Entry::Value(value.into()));
        self
    }

    /// Points a reference (or its foreign key field) at `instance`.
    pub fn relate(mut self, name: impl Into<String>, instance: &Instance) -> Record {
        self.entries
            .insert(name.into(), Entry::Instance(instance.clone()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the record into the insert's column list and values.
    ///
    /// Every field of `table` is visited in declaration order; fields the
    /// database fills in are left out of the column list.
    pub(crate) fn prepare(
        self,
        schema: &Schema,
        dialect: &dyn Dialect,
        table: TableId,
    ) -> Result<(Vec<FieldId>, Vec<InsertValue>)> {
        let mut supplied: IndexMap<FieldId, Value> = IndexMap::new();

        for (name, entry) in self.entries {
            let field = match schema.field_by_name(table, &name) {
                Ok(field) => field,
                Err(err) => match schema.reference_by_name(table, &name) {
                    Ok(reference) => schema.field(reference.field),
                    Err(_) => return Err(err),
                },
            };

            let value = match entry {
                Entry::Value(value) => value,
                Entry::Instance(instance) => related_key(schema, field, &instance)?,
            };

            supplied.insert(field.id, value);
        }

        let mut columns = vec![];
        let mut row = vec![];

        for field in schema.fields_of(table) {
            match create_value(field, supplied.shift_remove(&field.id), dialect)? {
                Prepared::Value(value) => {
                    columns.push(field.id);
                    row.push(value);
                }
                Prepared::Omit => {}
            }
        }

        Ok((columns, row))
    }
}

/// The value of `field`'s foreign target on `instance`.
fn related_key(schema: &Schema, field: &Field, instance: &Instance) -> Result<Value> {
    let Some(foreign) = field.foreign else {
        return Err(Error::invalid_statement(format!(
            "field `{}` is not a foreign key and can't take an instance",
            schema.field_path(field.id)
        )));
    };

    instance.value(foreign).cloned().ok_or_else(|| {
        Error::invalid_statement(format!(
            "`{}` expects an instance of `{}`, got `{}`",
            schema.field_path(field.id),
            schema.table(schema.field(foreign).owner).type_name,
            instance.table().type_name,
        ))
    })
}

/// Decides what to store for `field` given the caller's value, if any.
///
/// A missing or null value on a nullable field stores null. Otherwise the
/// field's default policy applies; a server default is written as the
/// dialect's per-row default keyword, or the column is left out when the
/// dialect has none.
pub(crate) fn create_value(
    field: &Field,
    value: Option<Value>,
    dialect: &dyn Dialect,
) -> Result<Prepared> {
    let value = match value {
        Some(value) if !value.is_null() => value,
        _ if field.nullable => Value::Null,
        _ => match &field.default {
            DefaultPolicy::None => {
                return Err(Error::invalid_statement(format!(
                    "missing value for field `{}`",
                    field.name
                )))
            }
            DefaultPolicy::Server => {
                return Ok(match dialect.server_default() {
                    Some(_) => Prepared::Value(InsertValue::ServerDefault),
                    None => Prepared::Omit,
                })
            }
            DefaultPolicy::Now => Value::Timestamp(Local::now().fixed_offset()),
            DefaultPolicy::Value(value) => value.clone(),
        },
    };

    field.check(&value)?;
    Ok(Prepared::Value(InsertValue::Value(field.encode(value))))
}
