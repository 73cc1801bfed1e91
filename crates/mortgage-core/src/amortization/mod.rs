//! Level-payment amortization: the payment formula, the month-by-month
//! balance recurrence and the month-to-year fold.
//!
//! The monthly schedule is the only source of truth. Yearly rows are a
//! projection of it and are never computed independently.

pub mod monthly;
pub mod payment;
pub mod report;
pub mod table;
pub mod yearly;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::Money;
use crate::MortgageResult;

pub use monthly::{first_month, monthly_schedule, next_month};
pub use payment::monthly_payment;
pub use report::{calculate_schedule, ScheduleInput, ScheduleOutput};
pub use table::PaymentTable;
pub use yearly::{fold_month_into_year, yearly_schedule, MonthPosition};

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One period of a schedule, a single month or an aggregated year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Zero-based position in its schedule.
    pub index: usize,
    /// The level monthly payment, identical on every row.
    pub monthly_payment: Money,
    /// Balance owed at the start of the period.
    pub starting_balance: Money,
    /// Balance owed at the end of the period.
    pub ending_balance: Money,
    /// Part of the period's payments applied to principal.
    pub principal_paid: Money,
    /// Part of the period's payments applied to interest.
    pub interest_paid: Money,
}

impl PaymentRow {
    /// A zeroed row at `index`, the seed for a yearly fold.
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Total cash paid in the period.
    pub fn total_paid(&self) -> Money {
        self.principal_paid + self.interest_paid
    }
}

/// Which of the two schedules a caller wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Monthly,
    #[default]
    Yearly,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Totals over a whole monthly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub monthly_payment: Money,
    pub months: usize,
    pub years: usize,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    /// Final month's ending balance. Not forced to zero.
    pub residual_balance: Money,
}

impl ScheduleSummary {
    pub fn from_schedules(
        monthly_payment: Money,
        months: &[PaymentRow],
        years: &[PaymentRow],
    ) -> MortgageResult<Self> {
        let total_interest = checked_total(months.iter().map(|m| m.interest_paid), "interest")?;
        let total_principal = checked_total(months.iter().map(|m| m.principal_paid), "principal")?;
        let total_paid = monthly_payment
            .checked_mul(Decimal::from(months.len()))
            .ok_or_else(|| MortgageError::CalculationError("total paid overflows".into()))?;

        Ok(Self {
            monthly_payment,
            months: months.len(),
            years: years.len(),
            total_paid,
            total_interest,
            total_principal,
            residual_balance: months.last().map(|m| m.ending_balance).unwrap_or_default(),
        })
    }
}

fn checked_total(mut amounts: impl Iterator<Item = Money>, what: &str) -> MortgageResult<Money> {
    amounts
        .try_fold(Decimal::ZERO, |acc, x| acc.checked_add(x))
        .ok_or_else(|| MortgageError::CalculationError(format!("total {what} overflows")))
}
