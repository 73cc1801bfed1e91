//! Delimited loan records: `principal,termYears,ratePercent`, e.g. `200000,30,3.7`.
//!
//! Each field is parsed on its own. A field that does not parse is left at
//! zero and recorded, so callers can report every bad field of a record at
//! once. The record as a whole only converts to [`LoanTerms`] when all three
//! fields parse and the values pass core validation.

use std::fmt;
use std::str::FromStr;

use log::debug;
use mortgage_core::{LoanTerms, Money, MortgageError, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

pub const FIELD_PRINCIPAL: usize = 0;
pub const FIELD_TERM: usize = 1;
pub const FIELD_RATE: usize = 2;
pub const RECORD_FIELDS: usize = 3;

const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Principal,
    Term,
    Rate,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::Principal => write!(f, "principal"),
            RecordField::Term => write!(f, "term"),
            RecordField::Rate => write!(f, "rate"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("expected 3 comma-separated fields (principal,years,rate), found {found}")]
    TooFewFields { found: usize },

    #[error("could not parse {}", join_fields(.fields))]
    InvalidFields { fields: Vec<RecordField> },

    #[error(transparent)]
    Terms(#[from] MortgageError),

    #[error("malformed record input: {0}")]
    Malformed(#[from] csv::Error),
}

fn join_fields(fields: &[RecordField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of parsing one record. Values of failed fields are zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub principal: Money,
    pub term_months: u32,
    pub annual_rate: Rate,
    pub fields_found: usize,
    pub failed: Vec<RecordField>,
}

impl ParsedRecord {
    fn empty(fields_found: usize) -> Self {
        Self {
            principal: Decimal::ZERO,
            term_months: 0,
            annual_rate: Decimal::ZERO,
            fields_found,
            failed: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.fields_found >= RECORD_FIELDS && self.failed.is_empty()
    }

    pub fn into_terms(self) -> Result<LoanTerms, RecordError> {
        if self.fields_found < RECORD_FIELDS {
            return Err(RecordError::TooFewFields {
                found: self.fields_found,
            });
        }
        if !self.failed.is_empty() {
            return Err(RecordError::InvalidFields {
                fields: self.failed,
            });
        }
        Ok(LoanTerms::new(
            self.principal,
            self.term_months,
            self.annual_rate,
        )?)
    }
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(text.as_bytes())
}

/// Parse every record of a document, keyed by 1-based line number.
/// Blank lines and `#` comments are skipped.
pub fn parse_records(text: &str) -> Result<Vec<(usize, ParsedRecord)>, RecordError> {
    let mut records = Vec::new();

    for result in reader(text).records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(records.len() + 1);
        let fields: Vec<&str> = record.iter().collect();
        records.push((line, parse_tokens(&fields)));
    }

    Ok(records)
}

/// Parse a single record such as `"200000, 30, 3.7"`.
pub fn parse_record(line: &str) -> ParsedRecord {
    match parse_records(line) {
        Ok(records) => records
            .into_iter()
            .next()
            .map(|(_, record)| record)
            .unwrap_or_else(|| ParsedRecord::empty(0)),
        Err(e) => {
            debug!("unreadable record {line:?}: {e}");
            ParsedRecord::empty(0)
        }
    }
}

/// Parse the three fields when they arrive separately (command-line arguments).
pub fn parse_fields(principal: &str, years: &str, rate_percent: &str) -> ParsedRecord {
    parse_tokens(&[principal.trim(), years.trim(), rate_percent.trim()])
}

fn parse_tokens(fields: &[&str]) -> ParsedRecord {
    let mut record = ParsedRecord::empty(fields.len());
    if fields.len() < RECORD_FIELDS {
        return record;
    }
    if fields.len() > RECORD_FIELDS {
        debug!("ignoring {} trailing fields", fields.len() - RECORD_FIELDS);
    }

    match Decimal::from_str(fields[FIELD_PRINCIPAL]) {
        Ok(amount) => record.principal = amount,
        Err(_) => record.failed.push(RecordField::Principal),
    }

    match fields[FIELD_TERM]
        .parse::<u32>()
        .ok()
        .and_then(|years| years.checked_mul(MONTHS_PER_YEAR))
    {
        Some(months) => record.term_months = months,
        None => record.failed.push(RecordField::Term),
    }

    match Decimal::from_str(fields[FIELD_RATE]) {
        Ok(percent) => record.annual_rate = percent / dec!(100),
        Err(_) => record.failed.push(RecordField::Rate),
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string() {
        let record = parse_record("200000, 30, 3.7");
        assert!(record.is_ok());
        assert_eq!(record.principal, dec!(200_000));
        assert_eq!(record.term_months, 360);
        assert_eq!(record.annual_rate, dec!(0.037));

        let terms = record.into_terms().unwrap();
        assert_eq!(terms, LoanTerms::default());
    }

    #[test]
    fn test_wrong_number_of_tokens() {
        let record = parse_record("Hello World");
        assert!(!record.is_ok());
        assert_eq!(record.fields_found, 1);
        assert_eq!(record.principal, Decimal::ZERO);
        assert_eq!(record.term_months, 0);
        assert!(matches!(
            record.into_terms(),
            Err(RecordError::TooFewFields { found: 1 })
        ));
    }

    #[test]
    fn test_invalid_principal() {
        let record = parse_record("200k, 30, 3.7");
        assert_eq!(record.failed, vec![RecordField::Principal]);
        // the other fields still parse
        assert_eq!(record.principal, Decimal::ZERO);
        assert_eq!(record.term_months, 360);
        assert_eq!(record.annual_rate, dec!(0.037));
    }

    #[test]
    fn test_invalid_term() {
        let record = parse_record("200000, 12th of never, 3.7");
        assert_eq!(record.failed, vec![RecordField::Term]);
        assert_eq!(record.term_months, 0);
        assert_eq!(record.principal, dec!(200_000));
    }

    #[test]
    fn test_invalid_rate() {
        let record = parse_record("200000, 30, LIBOR+250");
        assert_eq!(record.failed, vec![RecordField::Rate]);
        assert_eq!(record.annual_rate, Decimal::ZERO);
    }

    #[test]
    fn test_every_bad_field_is_reported() {
        let err = parse_record("lots, forever, high").into_terms().unwrap_err();
        assert_eq!(err.to_string(), "could not parse principal, term, rate");
    }

    #[test]
    fn test_negative_and_overflowing_terms_fail() {
        assert_eq!(parse_record("1000, -5, 3").failed, vec![RecordField::Term]);
        assert_eq!(
            parse_record("1000, 4000000000, 3").failed,
            vec![RecordField::Term]
        );
    }

    #[test]
    fn test_core_validation_surfaces() {
        let err = parse_record("0, 30, 3.7").into_terms().unwrap_err();
        assert!(matches!(
            err,
            RecordError::Terms(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_fields() {
        let record = parse_fields("100000", "15", "5");
        assert!(record.is_ok());
        assert_eq!(record.term_months, 180);
        assert_eq!(record.annual_rate, dec!(0.05));
    }

    #[test]
    fn test_parse_records_document() {
        let text = "# principal,years,rate\n200000,30,3.7\n\n100000, 15, 5\nbad\n";
        let records = parse_records(text).unwrap();

        assert_eq!(records.len(), 3);
        assert!(records[0].1.is_ok());
        assert_eq!(records[1].1.principal, dec!(100_000));
        assert!(!records[2].1.is_ok());

        // line numbers follow document order
        assert!(records[0].0 >= 1);
        assert!(records[0].0 < records[1].0 && records[1].0 < records[2].0);
    }

    #[test]
    fn test_trailing_fields_are_ignored() {
        let record = parse_record("200000,30,3.7,fixed");
        assert!(record.is_ok());
        assert_eq!(record.fields_found, 4);
    }

    #[test]
    fn test_empty_record() {
        assert!(matches!(
            parse_record("").into_terms(),
            Err(RecordError::TooFewFields { found: 0 })
        ));
    }
}
