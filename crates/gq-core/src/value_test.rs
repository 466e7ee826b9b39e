use super::*;

fn sample() -> ResultSet {
    ResultSet::new(
        vec!["museum_id".to_string(), "name".to_string()],
        vec![
            vec![Value::Integer(1), Value::from("Louvre")],
            vec![Value::Integer(2), Value::Null],
        ],
    )
    .unwrap()
}

#[test]
fn test_get_by_column_name() {
    let rs = sample();
    assert_eq!(rs.get(0, "name"), Some(&Value::from("Louvre")));
    assert_eq!(rs.get(1, "name"), Some(&Value::Null));
    assert_eq!(rs.get(0, "missing"), None);
    assert_eq!(rs.get(5, "name"), None);
}

#[test]
fn test_column_values() {
    let rs = sample();
    let ids: Vec<i64> = rs
        .column("museum_id")
        .unwrap()
        .into_iter()
        .filter_map(Value::as_i64)
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_ragged_rows_rejected() {
    let err = ResultSet::new(
        vec!["a".to_string(), "b".to_string()],
        vec![vec![Value::Integer(1)]],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::RaggedRow {
            row: 0,
            width: 1,
            columns: 2
        }
    ));
    assert!(err.to_string().starts_with("[E006] Row 0 has 1 values"));
}

#[test]
fn test_display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    let date = NaiveDate::from_ymd_opt(1853, 3, 30).unwrap();
    assert_eq!(Value::Date(date).to_string(), "1853-03-30");
}

#[test]
fn test_as_f64_widens_integers() {
    assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
    assert_eq!(Value::from("3").as_f64(), None);
}

#[test]
fn test_from_option() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(7_i64)), Value::Integer(7));
}

#[test]
fn test_json_records() {
    let rs = sample();
    let json = rs.to_json_records();
    assert_eq!(
        json,
        serde_json::json!([
            {"museum_id": 1, "name": "Louvre"},
            {"museum_id": 2, "name": null}
        ])
    );
}

#[test]
fn test_to_string_rows() {
    let rs = sample();
    assert_eq!(
        rs.to_string_rows(),
        vec![vec!["1", "Louvre"], vec!["2", "null"]]
    );
}
