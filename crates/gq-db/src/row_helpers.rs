//! Decoding DuckDB rows into [`gq_core::Value`] cells.

use crate::error::{DbError, DbResult};
use chrono::{DateTime, NaiveDate};
use duckdb::types::{TimeUnit, Value as DuckValue};
use gq_core::{ResultSet, Value};

/// Convert one DuckDB value into the scalar model.
///
/// Engine types outside the model (intervals, lists, structs, ...) are kept
/// as their debug rendering so no cell is silently dropped.
pub(crate) fn convert_value(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(b) => Value::Boolean(b),
        DuckValue::TinyInt(n) => Value::Integer(n.into()),
        DuckValue::SmallInt(n) => Value::Integer(n.into()),
        DuckValue::Int(n) => Value::Integer(n.into()),
        DuckValue::BigInt(n) => Value::Integer(n),
        DuckValue::UTinyInt(n) => Value::Integer(n.into()),
        DuckValue::USmallInt(n) => Value::Integer(n.into()),
        DuckValue::UInt(n) => Value::Integer(n.into()),
        DuckValue::UBigInt(n) => i64::try_from(n)
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(n.to_string())),
        DuckValue::HugeInt(n) => i64::try_from(n)
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(n.to_string())),
        DuckValue::Float(f) => Value::Float(f.into()),
        DuckValue::Double(f) => Value::Float(f),
        DuckValue::Decimal(d) => {
            let text = d.to_string();
            text.parse::<f64>()
                .map(Value::Float)
                .unwrap_or(Value::Text(text))
        }
        DuckValue::Text(s) => Value::Text(s),
        DuckValue::Date32(days) => date_from_days(days)
            .map(Value::Date)
            .unwrap_or(Value::Integer(days.into())),
        DuckValue::Timestamp(unit, raw) => DateTime::from_timestamp_micros(to_micros(unit, raw))
            .map(|ts| Value::Timestamp(ts.naive_utc()))
            .unwrap_or(Value::Integer(raw)),
        other => Value::Text(format!("{other:?}")),
    }
}

fn date_from_days(days: i32) -> Option<NaiveDate> {
    DateTime::from_timestamp(i64::from(days) * 86_400, 0).map(|dt| dt.date_naive())
}

fn to_micros(unit: TimeUnit, raw: i64) -> i64 {
    match unit {
        TimeUnit::Second => raw.saturating_mul(1_000_000),
        TimeUnit::Millisecond => raw.saturating_mul(1_000),
        TimeUnit::Microsecond => raw,
        TimeUnit::Nanosecond => raw / 1_000,
    }
}

/// Execute a prepared statement and collect every row.
///
/// DuckDB panics on `stmt.column_count()` before execution, so rows are
/// collected via `query_map` first and column metadata read afterwards.
pub(crate) fn collect_result_set(stmt: &mut duckdb::Statement<'_>) -> DbResult<ResultSet> {
    let rows: Vec<Vec<Value>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            (0..col_count)
                .map(|i| row.get::<_, DuckValue>(i).map(convert_value))
                .collect::<Result<Vec<_>, _>>()
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let column_count = stmt.column_count();
    let columns: Vec<String> = (0..column_count)
        .map(|i| {
            stmt.column_name(i)
                .map_or("?".to_string(), |name| name.to_string())
        })
        .collect();

    ResultSet::new(columns, rows).map_err(|e| DbError::ExecutionError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_widen() {
        assert_eq!(convert_value(DuckValue::Int(7)), Value::Integer(7));
        assert_eq!(convert_value(DuckValue::UTinyInt(3)), Value::Integer(3));
        assert_eq!(convert_value(DuckValue::HugeInt(42)), Value::Integer(42));
    }

    #[test]
    fn test_oversized_unsigned_kept_as_text() {
        assert_eq!(
            convert_value(DuckValue::UBigInt(u64::MAX)),
            Value::Text(u64::MAX.to_string())
        );
    }

    #[test]
    fn test_date32() {
        let date = convert_value(DuckValue::Date32(0));
        assert_eq!(date, Value::Date(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()));
    }

    #[test]
    fn test_timestamp_units() {
        assert_eq!(to_micros(TimeUnit::Second, 2), 2_000_000);
        assert_eq!(to_micros(TimeUnit::Nanosecond, 5_000), 5);
    }

    #[test]
    fn test_null_and_text() {
        assert_eq!(convert_value(DuckValue::Null), Value::Null);
        assert_eq!(
            convert_value(DuckValue::Text("Monet".to_string())),
            Value::Text("Monet".to_string())
        );
    }
}
