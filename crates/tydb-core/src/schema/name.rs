use heck::ToSnakeCase;

/// Derives a SQL table name from a type name: `TwoWords` becomes `two_words`.
pub(crate) fn table_name(type_name: &str) -> String {
    type_name.to_snake_case()
}
