use serde_json::Value;
use std::io;

use super::table::collect_headers;
use super::{batch_results, format_value, schedule_rows};

const ROW_HEADERS: [&str; 6] = [
    "index",
    "monthly_payment",
    "starting_balance",
    "ending_balance",
    "principal_paid",
    "interest_paid",
];

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = schedule_rows(value) {
        let _ = wtr.write_record(ROW_HEADERS);
        for row in rows {
            let record: Vec<String> = ROW_HEADERS
                .iter()
                .map(|h| row.get(*h).map(format_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    } else if let Some(results) = batch_results(value) {
        write_array_csv(&mut wtr, results);
    } else if let Value::Object(map) = value {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_value(value)]);
    }

    let _ = wtr.flush();
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    let headers = collect_headers(arr);
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
