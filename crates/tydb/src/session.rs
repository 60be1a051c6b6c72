mod builder;
pub use builder::Builder;

use crate::{
    materialize::Materializer,
    record::{self, Prepared},
    Binding, Instance, Joins, Query, QueryResult, Record,
};

use tydb_core::{
    driver::{AsyncConnection, AsyncCursor},
    schema::TableId,
    stmt::Value,
    Error, Result, Row, Schema,
};
use tydb_sql::{
    stmt::{Delete, Insert, Statement},
    Dialect, Serializer,
};

use std::sync::Arc;

/// Runs statements for one schema over one connection.
///
/// Every operation acquires its own cursor. The session performs no
/// locking: callers must not run two operations on it at once.
pub struct AsyncSession<C> {
    conn: C,
    schema: Arc<Schema>,
    dialect: Arc<dyn Dialect>,
}

impl AsyncSession<()> {
    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl<C: AsyncConnection> AsyncSession<C> {
    pub(crate) fn new(schema: Arc<Schema>, dialect: Arc<dyn Dialect>, conn: C) -> AsyncSession<C> {
        AsyncSession {
            conn,
            schema,
            dialect,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.dialect
    }

    pub fn connection(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn into_connection(self) -> C {
        self.conn
    }

    /// Creates each table unless it already exists, on a single cursor.
    pub async fn setup(&mut self, tables: &[TableId]) -> Result<()> {
        let statements = tables
            .iter()
            .map(|table| Statement::create_table(&self.schema, *table))
            .collect();
        self.execute_all(statements).await
    }

    /// Drops each table if it exists, on a single cursor.
    pub async fn destroy(&mut self, tables: &[TableId]) -> Result<()> {
        let statements = tables
            .iter()
            .map(|table| Statement::drop_table_if_exists(&self.schema, *table))
            .collect();
        self.execute_all(statements).await
    }

    /// Runs a query, returning its rows as instances.
    pub async fn select(&mut self, query: impl Into<Query>) -> Result<QueryResult<'_, Instance>> {
        let select = query.into().into_select(&self.schema)?;
        let materializer =
            Materializer::new(self.schema.clone(), select.table, select.joins.clone());

        let cursor = self.execute(&Statement::Select(select)).await?;
        Ok(QueryResult::new(cursor, move |row| materializer.materialize(row)))
    }

    /// The single row matching a query.
    ///
    /// Fails with a lookup error when no row or more than one row matches.
    pub async fn get(&mut self, query: impl Into<Query>) -> Result<Instance> {
        let query = query.into();
        let table = self.schema.table(query.target(&self.schema)).type_name.clone();

        let mut result = self.select(query.limit(2)).await?;
        let mut rows = result.collect().await?;

        match rows.len() {
            0 => Err(Error::record_not_found(format!("table `{table}`"))),
            1 => Ok(rows.remove(0)),
            _ => Err(Error::too_many_records(format!("table `{table}`"))),
        }
    }

    /// The first row matching a query, if any.
    pub async fn first(&mut self, query: impl Into<Query>) -> Result<Option<Instance>> {
        let mut result = self.select(query.into().limit(1)).await?;
        result.next().await.transpose()
    }

    /// Fetches the row a reference of `instance` points at.
    pub async fn load(&mut self, instance: &mut Instance, name: &str) -> Result<Option<Instance>> {
        self.load_with(instance, name, Joins::None).await
    }

    /// Fetches the row a reference of `instance` points at, joining the
    /// related row's own references per `joins`.
    ///
    /// An already fetched reference is returned as is. A fetched row is
    /// stored on the instance.
    pub async fn load_with(
        &mut self,
        instance: &mut Instance,
        name: &str,
        joins: Joins,
    ) -> Result<Option<Instance>> {
        let schema = self.schema.clone();
        let reference = schema.reference_by_name(instance.table_id(), name)?;

        if let Some(Binding::Fetched(related)) = instance.binding(reference.id) {
            return Ok(related.as_deref().cloned());
        }

        let field = schema.field(reference.field);
        let Some(foreign) = field.foreign else {
            return Err(Error::invalid_schema(format!(
                "reference field `{}` not foreign",
                schema.field_path(field.id)
            )));
        };

        let key = instance.value(field.id).cloned().unwrap_or_default();
        if key.is_null() {
            instance.bind(reference.id, None);
            return Ok(None);
        }

        let query = Query::table(reference.target)
            .filter(schema.field(foreign).eq(key))
            .joins(joins);

        match self.first(query).await? {
            Some(related) => {
                instance.bind(reference.id, Some(related.clone()));
                Ok(Some(related))
            }
            None if reference.nullable => Ok(None),
            None => Err(Error::record_not_found(format!(
                "`{}.{}` points at a missing row",
                schema.table(reference.owner).type_name,
                reference.name
            ))),
        }
    }

    /// Inserts one row, returning the generated key when the connection
    /// reports one.
    pub async fn create(&mut self, table: impl Into<TableId>, record: Record) -> Result<Option<i64>> {
        let table = table.into();
        let (columns, row) = record.prepare(&self.schema, &*self.dialect, table)?;
        let insert = Insert::new(table, columns, vec![row])?;

        let cursor = self.execute(&Statement::Insert(insert)).await?;

        Ok(match cursor.last_row_id() {
            Some(id) if id >= 0 => Some(id),
            Some(id) => {
                tracing::warn!(id, "cursor reported an unusable last row id");
                None
            }
            None => None,
        })
    }

    /// Inserts many rows in one statement.
    ///
    /// Each row holds one value per entry of `columns`. A null stands for
    /// the field's default, which must be expressible per row: a server
    /// default on a dialect without a default keyword is an error.
    pub async fn bulk_create<I>(
        &mut self,
        table: impl Into<TableId>,
        columns: &[&str],
        rows: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let table = table.into();
        let fields = columns
            .iter()
            .map(|name| self.schema.field_by_name(table, name))
            .collect::<Result<Vec<_>>>()?;

        let mut values = vec![];

        for row in rows {
            if row.len() != fields.len() {
                return Err(Error::invalid_statement(format!(
                    "bulk row has {} values for {} columns",
                    row.len(),
                    fields.len()
                )));
            }

            let mut prepared = Vec::with_capacity(row.len());

            for (field, value) in fields.iter().zip(row) {
                match record::create_value(field, Some(value), &*self.dialect)? {
                    Prepared::Value(value) => prepared.push(value),
                    Prepared::Omit => {
                        return Err(Error::invalid_statement(
                            "can't omit values during bulk insert",
                        ))
                    }
                }
            }

            values.push(prepared);
        }

        if values.is_empty() {
            return Ok(());
        }

        let columns = fields.iter().map(|field| field.id).collect();
        let insert = Insert::new(table, columns, values)?;
        self.execute(&Statement::Insert(insert)).await?;
        Ok(())
    }

    /// Deletes the rows behind `instances`, which must share a table.
    ///
    /// Rows of a table without a primary key are matched on every field,
    /// one instance at a time.
    pub async fn remove(&mut self, instances: &[Instance]) -> Result<()> {
        let Some(first) = instances.first() else {
            return Ok(());
        };

        let table = first.table_id();
        if instances.iter().any(|instance| instance.table_id() != table) {
            return Err(Error::invalid_statement(
                "can't remove instances of different tables together",
            ));
        }

        let delete = match self.schema.primary_key(table) {
            Some(primary_key) => {
                let keys = instances
                    .iter()
                    .map(|instance| instance.values()[primary_key.index].clone())
                    .collect();
                Delete::by_keys(&self.schema, table, keys)?
            }
            None if instances.len() == 1 => Delete::matching(&self.schema, table, first.values())?,
            None => {
                return Err(Error::invalid_statement(
                    "can only delete single instance of table without primary key",
                ))
            }
        };

        self.execute(&Statement::Delete(delete)).await?;
        Ok(())
    }

    /// Deletes rows of `table` by primary key.
    pub async fn delete<I>(&mut self, table: impl Into<TableId>, keys: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let keys: Vec<Value> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Ok(());
        }

        let delete = Delete::by_keys(&self.schema, table.into(), keys)?;
        self.execute(&Statement::Delete(delete)).await?;
        Ok(())
    }

    /// Runs hand written SQL, returning its rows undecoded.
    pub async fn raw(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult<'_, Row>> {
        let mut cursor = self.conn.cursor().await?;
        run(&mut *cursor, self.dialect.name(), sql, params).await?;
        Ok(QueryResult::new(cursor, Ok))
    }

    fn serialize(&self, stmt: &Statement) -> (String, Vec<Value>) {
        let mut params = vec![];
        let sql = Serializer::new(&self.schema, &*self.dialect).serialize(stmt, &mut params);
        (sql, params)
    }

    async fn execute(&mut self, stmt: &Statement) -> Result<Box<dyn AsyncCursor + '_>> {
        let (sql, params) = self.serialize(stmt);

        let mut cursor = self.conn.cursor().await?;
        run(&mut *cursor, self.dialect.name(), &sql, &params).await?;
        Ok(cursor)
    }

    async fn execute_all(&mut self, statements: Vec<Statement>) -> Result<()> {
        let compiled: Vec<_> = statements.iter().map(|stmt| self.serialize(stmt)).collect();

        let mut cursor = self.conn.cursor().await?;
        for (sql, params) in &compiled {
            run(&mut *cursor, self.dialect.name(), sql, params).await?;
        }
        Ok(())
    }
}

async fn run(
    cursor: &mut (dyn AsyncCursor + '_),
    dialect: &'static str,
    sql: &str,
    params: &[Value],
) -> Result<()> {
    tracing::debug!(dialect, sql, ?params, "executing statement");

    cursor
        .execute(sql, params)
        .await
        .map_err(|err| err.context(Error::execution_failed(sql)))
}
