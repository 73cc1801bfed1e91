use std::iter;

use rust_decimal::Decimal;

use super::PaymentRow;
use crate::error::MortgageError;
use crate::loan::{LoanTerms, MONTHS_PER_YEAR};
use crate::types::Money;
use crate::MortgageResult;

/// Row 0: the full principal is outstanding and `payment` is the level
/// payment every later row inherits.
pub fn first_month(terms: &LoanTerms, payment: Money) -> MortgageResult<PaymentRow> {
    settle_month(terms, 0, payment, terms.principal())
}

/// The month after `previous`. The payment is carried forward rather than
/// recomputed, so every row agrees with row 0 to the last digit.
pub fn next_month(terms: &LoanTerms, previous: &PaymentRow) -> MortgageResult<PaymentRow> {
    settle_month(
        terms,
        previous.index + 1,
        previous.monthly_payment,
        previous.ending_balance,
    )
}

fn settle_month(
    terms: &LoanTerms,
    index: usize,
    monthly_payment: Money,
    starting_balance: Money,
) -> MortgageResult<PaymentRow> {
    let overflow = || MortgageError::CalculationError(format!("month {index} overflows"));

    let interest_paid = starting_balance
        .checked_mul(terms.annual_rate())
        .and_then(|x| x.checked_div(Decimal::from(MONTHS_PER_YEAR)))
        .ok_or_else(overflow)?;
    let principal_paid = monthly_payment
        .checked_sub(interest_paid)
        .ok_or_else(overflow)?;

    // No floor at zero: the residue of the last month is kept as computed.
    let ending_balance = starting_balance
        .checked_sub(principal_paid)
        .ok_or_else(overflow)?;

    Ok(PaymentRow {
        index,
        monthly_payment,
        starting_balance,
        ending_balance,
        principal_paid,
        interest_paid,
    })
}

/// Build the month-by-month schedule, exactly `term_months` rows.
/// Stops at the first month whose arithmetic overflows.
pub fn monthly_schedule(terms: &LoanTerms, payment: Money) -> MortgageResult<Vec<PaymentRow>> {
    iter::successors(Some(first_month(terms, payment)), |previous| {
        previous.as_ref().ok().map(|row| next_month(terms, row))
    })
    .take(terms.term_months() as usize)
    .collect()
}
