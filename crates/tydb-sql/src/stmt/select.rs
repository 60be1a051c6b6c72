use super::*;

use tydb_core::schema::{Join, TableId};

/// `SELECT` of a table's fields plus those of each left-joined table.
#[derive(Debug, Clone)]
pub struct Select {
    /// Table rows are read from
    pub table: TableId,

    /// Joined tables, in the order their columns follow the base columns
    pub joins: Vec<Join>,

    pub filter: Option<Expr>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

impl Select {
    pub fn new(table: TableId) -> Select {
        Select {
            table,
            joins: vec![],
            filter: None,
            limit: None,
            offset: None,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
