use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Schedules are exported one row per month with raw decimal values so the
/// file can be re-imported without losing precision; other results become a
/// two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                if let Some(Value::Array(rows)) = result.get("schedule") {
                    write_array_csv(&mut wtr, rows);
                } else {
                    let _ = wtr.write_record(["field", "value"]);
                    write_fields(&mut wtr, "", result);
                }
            }
            _ => {
                let _ = wtr.write_record(["field", "value"]);
                write_fields(&mut wtr, "", map);
            }
        },
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

/// Flatten nested objects into dotted field names, e.g. `summary.total_interest`.
fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    map: &serde_json::Map<String, Value>,
) {
    for (key, val) in map {
        let field = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => write_fields(wtr, &field, inner),
            _ => {
                let _ = wtr.write_record([field.as_str(), &format_csv_value(val)]);
            }
        }
    }
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(f: impl FnOnce(&mut csv::Writer<Vec<u8>>)) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        f(&mut wtr);
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_schedule_rows() {
        let rows = vec![
            json!({"month": 1, "principal_end": "1100000", "is_grace_period": false}),
            json!({"month": 2, "principal_end": "1000000", "is_grace_period": false}),
        ];
        let out = render(|w| write_array_csv(w, &rows));
        assert_eq!(
            out,
            "month,principal_end,is_grace_period\n1,1100000,false\n2,1000000,false\n"
        );
    }

    #[test]
    fn test_nested_fields_are_dotted() {
        let result = json!({"summary": {"total_interest": "300000"}, "note": "ok"});
        let map = result.as_object().unwrap().clone();
        let out = render(|w| write_fields(w, "", &map));
        assert!(out.contains("summary.total_interest,300000\n"));
        assert!(out.contains("note,ok\n"));
    }
}
