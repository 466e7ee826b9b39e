//! Statement text generated from table and column lists.

use gq_core::sql_utils::{quote_column_list, quote_ident};

const ROW_NUMBER_COLUMN: &str = "__gq_rn";

/// Statement batch that keeps one row per group of equal `columns` values.
///
/// Rows with a NULL in any of `columns` are all kept: NULL never equals
/// NULL, so such rows are not coalesced. `columns` must name every column
/// of the table. The batch must run in a single transaction so readers
/// never see the emptied table.
pub fn dedup_statement(table: &str, columns: &[&str]) -> String {
    let target = quote_ident(table);
    let scratch = quote_ident(&format!("gq_dedup_{table}"));
    let partition = quote_column_list(columns);
    let null_guard: String = columns
        .iter()
        .map(|c| format!(" OR {} IS NULL", quote_ident(c)))
        .collect();

    format!(
        "CREATE OR REPLACE TEMP TABLE {scratch} AS \
         SELECT * EXCLUDE ({rn}) FROM (\
         SELECT *, row_number() OVER (PARTITION BY {partition}) AS {rn} FROM {target}\
         ) ranked WHERE {rn} = 1{null_guard};\n\
         DELETE FROM {target};\n\
         INSERT INTO {target} SELECT * FROM {scratch};\n\
         DROP TABLE {scratch};",
        rn = ROW_NUMBER_COLUMN,
    )
}

/// Delete every row of `table` matching `predicate`.
pub fn delete_statement(table: &str, predicate: &str) -> String {
    format!("DELETE FROM {} WHERE {}", quote_ident(table), predicate)
}

/// Number of rows beyond the first copy of each fully identical row.
pub fn duplicate_count_statement(table: &str) -> String {
    let target = quote_ident(table);
    format!(
        "SELECT (SELECT COUNT(*) FROM {target}) - \
         (SELECT COUNT(*) FROM (SELECT DISTINCT * FROM {target}) distinct_rows) \
         AS duplicate_rows"
    )
}
