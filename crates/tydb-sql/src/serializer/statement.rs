use super::{comma, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Statement::CreateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::DropTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let if_not_exists = if self.if_not_exists { "IF NOT EXISTS " } else { "" };
        let columns = comma(&self.columns);
        let primary_key = self
            .primary_key
            .as_ref()
            .map(|name| PrimaryKey(Ident(name)));

        fmt!(
            f, "CREATE TABLE " if_not_exists Ident(&self.name) " (" columns primary_key ")"
        );
    }
}

struct PrimaryKey<S>(Ident<S>);

impl<S: AsRef<str>> ToSql for PrimaryKey<S> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, ", PRIMARY KEY (" self.0 ")");
    }
}

impl ToSql for &stmt::ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let schema = f.serializer.schema;
        let ty = f
            .serializer
            .dialect
            .column_type(schema, schema.field(self.field));
        let ty = ty.as_ref();
        let null = if self.nullable { " NULL" } else { " NOT NULL" };

        fmt!(f, Ident(&self.name) " " ty null self.default.as_ref());
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };

        fmt!(f, "DROP TABLE " if_exists Ident(&self.name));
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let schema = f.serializer.schema;
        let table = f.serializer.table_name(self.table);

        let base = schema
            .fields_of(self.table)
            .map(|field| stmt::Expr::Column(field.column()));
        let joined = self.joins.iter().flat_map(|join| {
            schema
                .fields_of(join.target)
                .map(|field| stmt::Expr::Column(field.aliased(&join.alias)))
        });
        let columns: Vec<_> = base.chain(joined).collect();

        fmt!(f, "SELECT " comma(&columns) " FROM " table);

        for join in &self.joins {
            let target = f.serializer.table_name(join.target);
            let on = &join.on;
            fmt!(f, " LEFT JOIN " target " AS " Ident(&join.alias) " ON " on);
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => fmt!(f, " LIMIT " limit " OFFSET " offset),
            (Some(limit), None) => fmt!(f, " LIMIT " limit),
            (None, Some(offset)) => match f.serializer.dialect.unbounded_limit() {
                Some(limit) => fmt!(f, " LIMIT " limit " OFFSET " offset),
                None => fmt!(f, " OFFSET " offset),
            },
            (None, None) => {}
        }
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = f.serializer.table_name(self.table);

        if self.is_default_values() {
            fmt!(f, "INSERT INTO " table " DEFAULT VALUES");
            return;
        }

        let serializer = f.serializer;
        let columns = comma(self.columns.iter().map(|field| serializer.column_name(*field)));
        let rows = comma(self.rows.iter().map(Row));

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES " rows);
    }
}

struct Row<'a>(&'a Vec<stmt::InsertValue>);

impl ToSql for Row<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "(" comma(self.0) ")");
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = f.serializer.table_name(self.table);

        let filter = &self.filter;
        fmt!(f, "DELETE FROM " table " WHERE " filter);
    }
}
