//! SQL quoting helpers for statements built from names and paths.

/// Quote a SQL identifier, doubling embedded double quotes.
///
/// # Examples
/// ```
/// use gq_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("museum"), r#""museum""#);
/// assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote each column and join them with `", "`.
///
/// # Examples
/// ```
/// use gq_core::sql_utils::quote_column_list;
/// assert_eq!(quote_column_list(&["a", "b"]), r#""a", "b""#);
/// ```
pub fn quote_column_list<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| quote_ident(c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render `value` as a single-quoted SQL string literal.
///
/// # Examples
/// ```
/// use gq_core::sql_utils::string_literal;
/// assert_eq!(string_literal("data/o'keeffe.csv"), "'data/o''keeffe.csv'");
/// ```
pub fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
