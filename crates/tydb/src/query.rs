use tydb_core::{
    schema::{CollectionId, JoinPath, TableId},
    stmt::{Expr, Value},
    Result, Schema,
};
use tydb_sql::stmt::Select;

/// What a session should read and how.
///
/// A query targets either a table or a [`BoundCollection`]. Targeting a
/// collection reads the collection's owning table, restricted to rows whose
/// foreign key points at the bound instance.
#[derive(Debug, Clone)]
pub struct Query {
    source: Source,
    filter: Option<Expr>,
    joins: Joins,
    limit: Option<u64>,
    offset: Option<u64>,
}

#[derive(Debug, Clone)]
enum Source {
    Table(TableId),
    Collection(BoundCollection),
}

/// Which references a query joins in.
#[derive(Debug, Clone, Default)]
pub enum Joins {
    /// Only the queried table's columns are read
    #[default]
    None,

    /// The listed reference paths
    Paths(Vec<JoinPath>),

    /// Every acyclic reference path from the queried table
    Auto,
}

/// A collection together with the key of the instance it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCollection {
    collection: CollectionId,
    value: Value,
}

impl BoundCollection {
    pub fn new(collection: CollectionId, value: impl Into<Value>) -> BoundCollection {
        BoundCollection {
            collection,
            value: value.into(),
        }
    }

    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    /// Key of the instance owning the collection
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Query {
    pub fn table(table: impl Into<TableId>) -> Query {
        Query::from_source(Source::Table(table.into()))
    }

    pub fn collection(collection: BoundCollection) -> Query {
        Query::from_source(Source::Collection(collection))
    }

    fn from_source(source: Source) -> Query {
        Query {
            source,
            filter: None,
            joins: Joins::None,
            limit: None,
            offset: None,
        }
    }

    /// Restricts the query; repeated calls are ANDed together.
    pub fn filter(mut self, expr: impl Into<Expr>) -> Query {
        self.filter = Some(Expr::and_option(self.filter.take(), expr));
        self
    }

    /// Joins one reference path in. Has no effect once `auto_join` is set.
    pub fn join(mut self, path: impl Into<JoinPath>) -> Query {
        if let Joins::None = self.joins {
            self.joins = Joins::Paths(vec![]);
        }

        if let Joins::Paths(paths) = &mut self.joins {
            paths.push(path.into());
        }
        self
    }

    pub fn auto_join(self) -> Query {
        self.joins(Joins::Auto)
    }

    pub fn joins(mut self, joins: Joins) -> Query {
        self.joins = joins;
        self
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Query {
        self.offset = Some(offset);
        self
    }

    /// The table rows are read from.
    pub fn target(&self, schema: &Schema) -> TableId {
        match &self.source {
            Source::Table(table) => *table,
            Source::Collection(bound) => {
                let collection = schema.collection(bound.collection);
                schema.reference(collection.reference).owner
            }
        }
    }

    /// Lowers the query into a `SELECT` against `schema`.
    pub fn into_select(self, schema: &Schema) -> Result<Select> {
        let (table, filter) = match self.source {
            Source::Table(table) => (table, self.filter),
            Source::Collection(bound) => {
                let collection = schema.collection(bound.collection);
                let reference = schema.reference(collection.reference);
                let relate = schema.field(reference.field).eq(bound.value);

                let filter = match self.filter {
                    Some(filter) => Expr::and(relate, filter),
                    None => relate,
                };

                (reference.owner, Some(filter))
            }
        };

        let joins = match self.joins {
            Joins::None => vec![],
            Joins::Paths(paths) => schema.join_refs(table, paths)?,
            Joins::Auto => schema.join_refs(table, schema.walk_refs(table))?,
        };

        let mut select = Select::new(table);
        select.joins = joins;
        select.filter = filter;
        select.limit = self.limit;
        select.offset = self.offset;
        Ok(select)
    }
}

impl From<TableId> for Query {
    fn from(value: TableId) -> Self {
        Query::table(value)
    }
}

impl From<BoundCollection> for Query {
    fn from(value: BoundCollection) -> Self {
        Query::collection(value)
    }
}
