use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{batch_results, decimal_value, format_value, schedule_rows};

const ROW_FIELDS: [(&str, &str); 5] = [
    ("monthly_payment", "Payment"),
    ("starting_balance", "Starting Balance"),
    ("ending_balance", "Ending Balance"),
    ("principal_paid", "Principal"),
    ("interest_paid", "Interest"),
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    if let (Some(rows), Some(Value::Object(result))) = (schedule_rows(value), value.get("result")) {
        println!("{}", summary_table(result));
        println!();
        println!("{}", rows_table(result, rows));
        print_notes(value);
    } else if let Some(results) = batch_results(value) {
        print_array_table(results);
    } else {
        println!("{}", format_value(value));
    }
}

fn summary_table(result: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);

    if let Some(Value::Object(terms)) = result.get("terms") {
        for (key, val) in terms {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
    }
    for (key, val) in result {
        if matches!(key.as_str(), "terms" | "rows") {
            continue;
        }
        builder.push_record([key.as_str(), &format_amount(val)]);
    }

    Table::from(builder)
}

fn rows_table(result: &Map<String, Value>, rows: &[Value]) -> Table {
    let period = match result.get("granularity").and_then(Value::as_str) {
        Some("monthly") => "Month",
        _ => "Year",
    };

    let mut builder = Builder::default();
    let mut header = vec![period.to_string()];
    header.extend(ROW_FIELDS.iter().map(|(_, label)| label.to_string()));
    builder.push_record(header);

    for row in rows {
        let index = row.get("index").and_then(Value::as_u64).unwrap_or_default();
        let mut record = vec![(index + 1).to_string()];
        record.extend(
            ROW_FIELDS
                .iter()
                .map(|(key, _)| row.get(*key).map(format_amount).unwrap_or_default()),
        );
        builder.push_record(record);
    }

    Table::from(builder)
}

fn print_notes(envelope: &Value) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let headers = collect_headers(arr);
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_amount).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

/// Union of object keys in first-seen order; failed records carry fewer keys.
pub(crate) fn collect_headers(arr: &[Value]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for item in arr {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    headers
}

/// Money to the cent; everything else as-is.
fn format_amount(value: &Value) -> String {
    match value {
        Value::String(s) if s.contains('.') => decimal_value(value)
            .map(|d| d.round_dp(2).to_string())
            .unwrap_or_else(|| s.clone()),
        _ => format_value(value),
    }
}
