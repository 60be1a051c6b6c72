use crate::{Binding, Instance};

use tydb_core::{
    schema::{Join, ReferenceId, TableId},
    stmt::Value,
    Error, Result, Row, Schema,
};

use std::sync::Arc;

/// Turns flat `SELECT` rows back into instances with their joined
/// references attached.
pub(crate) struct Materializer {
    schema: Arc<Schema>,
    table: TableId,
    joins: Vec<Join>,
}

impl Materializer {
    pub(crate) fn new(schema: Arc<Schema>, table: TableId, joins: Vec<Join>) -> Materializer {
        Materializer {
            schema,
            table,
            joins,
        }
    }

    /// Slices `row` left to right: the base table's fields first, then one
    /// slice per join in join order.
    ///
    /// A slice of nothing but nulls is an outer join that matched no row and
    /// binds the reference as absent.
    pub(crate) fn materialize(&self, row: Row) -> Result<Instance> {
        let width = row.len();
        let mut values = row.into_iter();

        let slice = self.take_slice(self.table, &mut values, width)?;
        let mut root = Instance::from_row(self.schema.clone(), self.table, slice)?;

        for join in &self.joins {
            let slice = self.take_slice(join.target, &mut values, width)?;

            let related = if slice.iter().all(Value::is_null) {
                None
            } else {
                Some(Instance::from_row(self.schema.clone(), join.target, slice)?)
            };

            attach(&mut root, join.path.references(), related);
        }

        if values.next().is_some() {
            return Err(Error::invalid_statement(format!(
                "row has {width} values, more than the selected columns"
            )));
        }

        tracing::trace!(
            table = %root.table().type_name,
            joins = self.joins.len(),
            "materialized row"
        );
        Ok(root)
    }

    fn take_slice(
        &self,
        table: TableId,
        values: &mut impl Iterator<Item = Value>,
        width: usize,
    ) -> Result<Vec<Value>> {
        let count = self.schema.table(table).fields.len();
        let slice: Vec<_> = values.by_ref().take(count).collect();

        if slice.len() != count {
            return Err(Error::invalid_statement(format!(
                "row has {width} values, fewer than the selected columns"
            )));
        }

        Ok(slice)
    }
}

/// Binds `related` at the end of `path`, walking the already attached
/// prefix. Nothing is bound when a parent on the way is absent.
fn attach(instance: &mut Instance, path: &[ReferenceId], related: Option<Instance>) {
    match path {
        [] => {}
        [last] => instance.bind(*last, related),
        [first, rest @ ..] => {
            if let Some(Binding::Fetched(Some(parent))) = instance.binding_mut(*first) {
                attach(parent, rest, related);
            }
        }
    }
}
