//! Schedule report: a built [`PaymentTable`] wrapped in the standard
//! computation envelope, with the notes a reader of the table should see.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{Granularity, PaymentRow, PaymentTable, ScheduleSummary};
use crate::loan::{LoanTerms, MONTHS_PER_YEAR};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

/// Residual balances at or below this are treated as paid off.
const RESIDUAL_TOLERANCE: Money = dec!(0.01);

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub terms: LoanTerms,
    #[serde(default)]
    pub granularity: Granularity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub terms: LoanTerms,
    pub granularity: Granularity,
    #[serde(flatten)]
    pub summary: ScheduleSummary,
    pub rows: Vec<PaymentRow>,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Build the payment table for `input.terms` and report the rows at the
/// requested granularity.
pub fn calculate_schedule(input: &ScheduleInput) -> MortgageResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let table = PaymentTable::build(input.terms.clone())?;
    let summary = table.summary();

    if input.terms.is_zero_rate() {
        warnings.push("Zero interest rate: principal is repaid straight-line".into());
    }

    let final_year_months = input.terms.term_months() % MONTHS_PER_YEAR;
    if final_year_months != 0 {
        warnings.push(format!(
            "Final year covers {final_year_months} months; its ending balance is the last month's"
        ));
    }

    if summary.residual_balance.abs() > RESIDUAL_TOLERANCE {
        warnings.push(format!(
            "Residual balance of {} after the final payment",
            summary.residual_balance.round_dp(2)
        ));
    }

    let output = ScheduleOutput {
        terms: input.terms.clone(),
        granularity: input.granularity,
        summary,
        rows: table.rows(input.granularity).to_vec(),
    };

    with_metadata(
        "Fixed-rate amortization (level monthly payment)",
        input,
        warnings,
        start,
        output,
    )
}
