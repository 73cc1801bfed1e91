use serde_json::Value;

use super::currency::format_currency;
use super::{batch_results, decimal_value, format_value, schedule_rows};

/// Tab-separated table, one line per row:
/// `n)  payment  ending balance  principal  interest`.
pub fn print_tsv(value: &Value) {
    for line in render_tsv(value) {
        println!("{}", line);
    }
}

pub fn render_tsv(value: &Value) -> Vec<String> {
    if let Some(rows) = schedule_rows(value) {
        rows.iter().map(render_row).collect()
    } else if let Some(results) = batch_results(value) {
        results.iter().map(render_batch_line).collect()
    } else {
        vec![format_value(value)]
    }
}

fn render_row(row: &Value) -> String {
    let index = row.get("index").and_then(Value::as_u64).unwrap_or_default();
    format!(
        "{})\t{}\t{}\t{}\t{}",
        index + 1,
        currency_field(row, "monthly_payment"),
        currency_field(row, "ending_balance"),
        currency_field(row, "principal_paid"),
        currency_field(row, "interest_paid"),
    )
}

fn render_batch_line(item: &Value) -> String {
    let line = item.get("line").and_then(Value::as_u64).unwrap_or_default();
    match item.get("error").and_then(Value::as_str) {
        Some(err) => format!("{})\terror: {}", line, err),
        None => format!(
            "{})\t{}\t{}\t{}",
            line,
            currency_field(item, "monthly_payment"),
            currency_field(item, "total_paid"),
            currency_field(item, "total_interest"),
        ),
    }
}

fn currency_field(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(decimal_value)
        .map(format_currency)
        .unwrap_or_default()
}
