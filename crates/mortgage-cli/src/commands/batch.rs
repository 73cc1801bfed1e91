use clap::Args;
use log::{debug, warn};
use serde::Serialize;
use serde_json::{json, Value};

use mortgage_core::{Money, PaymentTable, Rate};

use crate::input;
use crate::input::record::ParsedRecord;

/// Arguments for summarising a file of loan records
#[derive(Args, Debug, Default)]
pub struct BatchArgs {
    /// File of `principal,years,rate` records, one per line, or `-` for stdin
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_batch(args: BatchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let text = match args.input.as_deref() {
        Some(input::STDIN_PATH) => {
            input::stdin::read_stdin()?.ok_or("no records piped to stdin")?
        }
        Some(path) => input::file::read_text(path)?,
        None => return Err("--input <records-file> (or `-` for stdin) required for batch".into()),
    };

    summarise_records(&text)
}

pub fn summarise_records(text: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let records = input::record::parse_records(text)?;
    if records.is_empty() {
        return Err("no loan records found".into());
    }
    debug!(
        "{} of {} records parsed",
        records.iter().filter(|(_, record)| record.is_ok()).count(),
        records.len()
    );

    let results: Vec<Value> = records
        .into_iter()
        .map(|(line, record)| summarise_record(line, record))
        .collect();

    if results.iter().all(|r| r.get("error").is_some()) {
        return Err(format!("none of the {} records could be used", results.len()).into());
    }

    Ok(json!({ "results": results }))
}

/// One usable record of a batch.
#[derive(Debug, Serialize)]
struct RecordSummary {
    line: usize,
    principal: Money,
    term_months: u32,
    annual_rate: Rate,
    monthly_payment: Money,
    total_paid: Money,
    total_interest: Money,
    residual_balance: Money,
}

fn summarise_record(line: usize, record: ParsedRecord) -> Value {
    let outcome = record
        .into_terms()
        .map_err(|e| e.to_string())
        .and_then(|terms| PaymentTable::build(terms).map_err(|e| e.to_string()));

    match outcome {
        Ok(table) => {
            debug!("line {}: payment {}", line, table.monthly_payment());
            let terms = table.terms();
            let summary = table.summary();
            json!(RecordSummary {
                line,
                principal: terms.principal(),
                term_months: terms.term_months(),
                annual_rate: terms.annual_rate(),
                monthly_payment: summary.monthly_payment,
                total_paid: summary.total_paid,
                total_interest: summary.total_interest,
                residual_balance: summary.residual_balance,
            })
        }
        Err(error) => {
            warn!("line {}: {}", line, error);
            json!({ "line": line, "error": error })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_batch() {
        let text = "200000,30,3.7\n200000, 30, LIBOR+250\n100000,15,5\n";
        let value = summarise_records(text).unwrap();
        let results = value["results"].as_array().unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["term_months"], 360);
        assert!(results[0]["monthly_payment"].as_str().unwrap().starts_with("920.56"));
        assert_eq!(results[1]["error"], "could not parse rate");
        assert_eq!(results[2]["term_months"], 180);
    }

    #[test]
    fn test_all_bad_records_fail() {
        assert!(summarise_records("Hello World\n200k, 30, 3.7\n").is_err());
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let err = run_batch(BatchArgs::default()).unwrap_err();
        assert!(err.to_string().contains("--input"));
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(summarise_records("# nothing here\n").is_err());
    }
}
