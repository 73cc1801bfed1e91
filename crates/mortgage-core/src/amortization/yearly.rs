use log::trace;

use super::PaymentRow;
use crate::error::MortgageError;
use crate::loan::MONTHS_PER_YEAR;
use crate::MortgageResult;

const MONTHS: usize = MONTHS_PER_YEAR as usize;

/// Where a month sits inside its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPosition {
    /// 0 for the first month of the year, 11 for the last.
    pub month_in_year: usize,
    /// True for month 11, and for the final month of a schedule whose last
    /// year is partial.
    pub closes_year: bool,
}

impl MonthPosition {
    pub fn new(month_index: usize, schedule_len: usize) -> Self {
        let month_in_year = month_index % MONTHS;
        Self {
            month_in_year,
            closes_year: month_in_year == MONTHS - 1 || month_index + 1 == schedule_len,
        }
    }

    pub fn opens_year(&self) -> bool {
        self.month_in_year == 0
    }
}

/// Fold one month into its year's running row.
///
/// Interest and principal accumulate. The starting balance is taken from
/// the month that opens the year, the ending balance from the month that
/// closes it. The payment is the constant monthly payment.
pub fn fold_month_into_year(
    mut year: PaymentRow,
    month: &PaymentRow,
    position: MonthPosition,
) -> MortgageResult<PaymentRow> {
    let year_index = year.index;
    let overflow =
        || MortgageError::CalculationError(format!("totals for year {year_index} overflow"));

    year.interest_paid = year
        .interest_paid
        .checked_add(month.interest_paid)
        .ok_or_else(overflow)?;
    year.principal_paid = year
        .principal_paid
        .checked_add(month.principal_paid)
        .ok_or_else(overflow)?;
    year.monthly_payment = month.monthly_payment;

    if position.opens_year() {
        year.starting_balance = month.starting_balance;
    }
    if position.closes_year {
        year.ending_balance = month.ending_balance;
    }

    Ok(year)
}

/// Aggregate a monthly schedule into ceil(len / 12) yearly rows.
///
/// Months are placed by their position in `months`, not by their stored
/// index, so any contiguous run starting at a year boundary folds correctly.
pub fn yearly_schedule(months: &[PaymentRow]) -> MortgageResult<Vec<PaymentRow>> {
    let schedule_len = months.len();

    months
        .chunks(MONTHS)
        .enumerate()
        .map(|(year_index, year_months)| {
            let row = year_months.iter().enumerate().try_fold(
                PaymentRow::empty(year_index),
                |year, (offset, month)| {
                    let position = MonthPosition::new(year_index * MONTHS + offset, schedule_len);
                    fold_month_into_year(year, month, position)
                },
            )?;
            trace!(
                "year {}: {} months, ending balance {}",
                year_index,
                year_months.len(),
                row.ending_balance
            );
            Ok(row)
        })
        .collect()
}
