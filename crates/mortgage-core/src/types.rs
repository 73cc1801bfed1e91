use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MortgageResult;

/// Dollar amounts: balances, payments, interest. Never `f64`.
pub type Money = Decimal;

/// Annual or periodic rates in decimal form (0.037 = 3.7%).
pub type Rate = Decimal;

/// Envelope around every report: the result plus what produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// The input as it was received, echoed back as JSON.
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl ComputationMetadata {
    /// Metadata for a computation that began at `started`.
    pub fn since(started: Instant) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: started.elapsed().as_micros() as u64,
            precision: "rust_decimal_128bit".to_string(),
        }
    }
}

/// Wrap `result` in the report envelope.
///
/// Fails with `SerializationError` if `assumptions` cannot be represented
/// as JSON.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    started: Instant,
    result: T,
) -> MortgageResult<ComputationOutput<T>> {
    Ok(ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions)?,
        warnings,
        metadata: ComputationMetadata::since(started),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MortgageError;
    use std::collections::HashMap;

    #[test]
    fn test_envelope_echoes_assumptions() {
        let out = with_metadata("test", &("loan", 360), vec![], Instant::now(), 42).unwrap();
        assert_eq!(out.result, 42);
        assert_eq!(out.assumptions, serde_json::json!(["loan", 360]));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_unserializable_assumptions_are_an_error() {
        // JSON object keys must be strings
        let mut by_pair = HashMap::new();
        by_pair.insert((1, 2), "month");

        let err = with_metadata("test", &by_pair, vec![], Instant::now(), ()).unwrap_err();
        assert!(matches!(err, MortgageError::SerializationError(_)));
    }
}
