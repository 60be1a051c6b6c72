use super::{ReferenceId, Schema, TableId};
use crate::{
    stmt::{BinaryOp, Expr, ExprBinaryOp, ExprColumn},
    Error, Result,
};

use indexmap::IndexMap;

/// An ordered chain of references, each hop starting where the previous
/// one ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinPath(Vec<ReferenceId>);

/// Everything needed to join one path prefix into a `SELECT`.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// References followed from the root table to reach this join
    pub path: JoinPath,

    /// Alias the joined table is known by, `_{ordinal}_{table}`
    pub alias: String,

    /// The joined table
    pub target: TableId,

    /// Parent foreign key equals target primary key
    pub on: Expr,
}

impl JoinPath {
    pub fn new(references: impl IntoIterator<Item = ReferenceId>) -> JoinPath {
        JoinPath(references.into_iter().collect())
    }

    pub fn references(&self) -> &[ReferenceId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<ReferenceId> {
        self.0.last().copied()
    }

    fn prefix(&self, len: usize) -> JoinPath {
        JoinPath(self.0[..len].to_vec())
    }
}

impl From<ReferenceId> for JoinPath {
    fn from(value: ReferenceId) -> Self {
        JoinPath(vec![value])
    }
}

impl From<Vec<ReferenceId>> for JoinPath {
    fn from(value: Vec<ReferenceId>) -> Self {
        JoinPath(value)
    }
}

impl From<&[ReferenceId]> for JoinPath {
    fn from(value: &[ReferenceId]) -> Self {
        JoinPath(value.to_vec())
    }
}

impl<const N: usize> From<[ReferenceId; N]> for JoinPath {
    fn from(value: [ReferenceId; N]) -> Self {
        JoinPath(value.to_vec())
    }
}

impl Schema {
    /// Lists every acyclic reference path starting at `table`.
    ///
    /// A hop into a table already entered earlier on the path is skipped,
    /// so self-referencing and mutually referencing tables terminate.
    pub fn walk_refs(&self, table: impl Into<TableId>) -> Vec<JoinPath> {
        let mut seen = vec![];
        self.walk_refs_from(table.into(), &mut seen)
            .into_iter()
            .map(JoinPath)
            .collect()
    }

    fn walk_refs_from(&self, table: TableId, seen: &mut Vec<TableId>) -> Vec<Vec<ReferenceId>> {
        let mut paths = vec![];

        for reference_id in &self.table(table).references {
            let reference = self.reference(*reference_id);

            if seen.contains(&reference.target) {
                continue;
            }

            paths.push(vec![reference.id]);

            seen.push(reference.target);
            for tail in self.walk_refs_from(reference.target, seen) {
                let mut path = Vec::with_capacity(tail.len() + 1);
                path.push(reference.id);
                path.extend(tail);
                paths.push(path);
            }
            seen.pop();
        }

        paths
    }

    /// Resolves join paths from `table` into aliased join specifications.
    ///
    /// Every distinct path prefix is joined once, in first-seen order. The
    /// same target reached through different prefixes gets separate aliases.
    pub fn join_refs<I>(&self, table: impl Into<TableId>, paths: I) -> Result<Vec<Join>>
    where
        I: IntoIterator,
        I::Item: Into<JoinPath>,
    {
        let table = table.into();
        let mut aliases: IndexMap<JoinPath, usize> = IndexMap::new();
        let mut joins: Vec<Join> = vec![];

        for path in paths {
            let path = path.into();
            self.validate_path(table, &path)?;

            for (pos, reference_id) in path.references().iter().enumerate() {
                let prefix = path.prefix(pos + 1);

                if aliases.contains_key(&prefix) {
                    continue;
                }

                let parent_alias = match pos {
                    0 => None,
                    _ => {
                        let parent = aliases[&path.prefix(pos)];
                        Some(joins[parent].alias.clone())
                    }
                };

                let reference = self.reference(*reference_id);
                let field = self.field(reference.field);
                let Some(foreign) = field.foreign else {
                    return Err(Error::invalid_schema(format!(
                        "reference field `{}` not foreign",
                        self.field_path(field.id)
                    )));
                };

                let target = self.table(reference.target);
                let alias = format!("_{}_{}", aliases.len() + 1, target.name);

                let on = ExprBinaryOp {
                    lhs: Box::new(Expr::Column(ExprColumn {
                        field: field.id,
                        alias: parent_alias,
                    })),
                    op: BinaryOp::Eq,
                    rhs: Box::new(Expr::Column(ExprColumn::aliased(foreign, alias.clone()))),
                }
                .into();

                aliases.insert(prefix.clone(), joins.len());
                joins.push(Join {
                    path: prefix,
                    alias,
                    target: target.id,
                    on,
                });
            }
        }

        Ok(joins)
    }

    fn validate_path(&self, table: TableId, path: &JoinPath) -> Result<()> {
        let mut from = table;

        if path.is_empty() {
            return Err(Error::invalid_statement("join path is empty"));
        }

        for reference_id in path.references() {
            let reference = self.reference(*reference_id);

            if reference.owner != from {
                return Err(Error::invalid_statement(format!(
                    "join path hop `{}.{}` does not start at table `{}`",
                    self.table(reference.owner).type_name,
                    reference.name,
                    self.table(from).type_name,
                )));
            }

            from = reference.target;
        }

        Ok(())
    }
}
