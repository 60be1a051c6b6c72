use super::Error;

/// Error when a table has no attribute with the requested name.
///
/// This occurs when:
/// - A table's configured primary key names no declared field
/// - A lookup by attribute name (field, reference or collection) misses
/// - A record passed to an insert names an unknown column
#[derive(Debug)]
pub(super) struct FieldNotFound {
    table: Box<str>,
    field: Box<str>,
}

impl std::error::Error for FieldNotFound {}

impl core::fmt::Display for FieldNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "field not found: {}.{}", self.table, self.field)
    }
}

impl Error {
    /// Creates a field not found error for `table.field`.
    pub fn field_not_found(table: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::FieldNotFound(FieldNotFound {
            table: table.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a field not found error.
    pub fn is_field_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::FieldNotFound(_))
    }
}
