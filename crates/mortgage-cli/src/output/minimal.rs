use serde_json::Value;

use super::{batch_results, format_value};

/// Print just the key answer: the level monthly payment.
///
/// Batch output prints one `line: payment` pair per record.
pub fn print_minimal(value: &Value) {
    for line in render_minimal(value) {
        println!("{}", line);
    }
}

pub fn render_minimal(value: &Value) -> Vec<String> {
    if let Some(results) = batch_results(value) {
        return results
            .iter()
            .map(|item| {
                let line = item.get("line").map(format_value).unwrap_or_default();
                let answer = item
                    .get("monthly_payment")
                    .or_else(|| item.get("error"))
                    .map(format_value)
                    .unwrap_or_default();
                format!("{}: {}", line, answer)
            })
            .collect();
    }

    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj.get("monthly_payment") {
        Some(payment) if !payment.is_null() => vec![format_value(payment)],
        _ => vec![format_value(result_obj)],
    }
}
