use log::debug;

use super::monthly::monthly_schedule;
use super::payment::monthly_payment;
use super::yearly::yearly_schedule;
use super::{Granularity, PaymentRow, ScheduleSummary};
use crate::error::{MortgageError, ScheduleKind};
use crate::loan::LoanTerms;
use crate::types::Money;
use crate::MortgageResult;

/// Monthly and yearly payment tables for one loan.
///
/// Both schedules are built eagerly by [`PaymentTable::build`] and never
/// change afterwards. Different terms need a new table.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentTable {
    terms: LoanTerms,
    monthly_payment: Money,
    months: Vec<PaymentRow>,
    years: Vec<PaymentRow>,
    summary: ScheduleSummary,
}

impl PaymentTable {
    pub fn build(terms: LoanTerms) -> MortgageResult<Self> {
        let payment = monthly_payment(&terms)?;
        let months = monthly_schedule(&terms, payment)?;
        let years = yearly_schedule(&months)?;
        let summary = ScheduleSummary::from_schedules(payment, &months, &years)?;

        debug!(
            "built payment table: principal {}, {} months at {}, payment {}",
            terms.principal(),
            terms.term_months(),
            terms.annual_rate(),
            payment
        );

        Ok(Self {
            terms,
            monthly_payment: payment,
            months,
            years,
            summary,
        })
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    /// Month `index`, zero-based.
    pub fn month(&self, index: usize) -> MortgageResult<&PaymentRow> {
        lookup(&self.months, ScheduleKind::Monthly, index)
    }

    pub fn months(&self) -> &[PaymentRow] {
        &self.months
    }

    /// Year `index`, zero-based.
    pub fn year(&self, index: usize) -> MortgageResult<&PaymentRow> {
        lookup(&self.years, ScheduleKind::Yearly, index)
    }

    pub fn years(&self) -> &[PaymentRow] {
        &self.years
    }

    pub fn rows(&self, granularity: Granularity) -> &[PaymentRow] {
        match granularity {
            Granularity::Monthly => &self.months,
            Granularity::Yearly => &self.years,
        }
    }

    /// Totals over the monthly schedule, computed once at build time.
    pub fn summary(&self) -> ScheduleSummary {
        self.summary.clone()
    }
}

fn lookup(rows: &[PaymentRow], schedule: ScheduleKind, index: usize) -> MortgageResult<&PaymentRow> {
    rows.get(index).ok_or(MortgageError::IndexOutOfRange {
        schedule,
        index,
        len: rows.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn demo_table() -> PaymentTable {
        PaymentTable::build(LoanTerms::default()).unwrap()
    }

    #[test]
    fn test_table_shapes() {
        let table = demo_table();
        assert_eq!(table.months().len(), 360);
        assert_eq!(table.years().len(), 30);
        assert_eq!(table.rows(Granularity::Monthly).len(), 360);
        assert_eq!(table.rows(Granularity::Yearly).len(), 30);
    }

    #[test]
    fn test_month_out_of_range() {
        let table = demo_table();
        assert!(table.month(359).is_ok());
        match table.month(360) {
            Err(MortgageError::IndexOutOfRange { schedule, index, len }) => {
                assert_eq!(schedule, ScheduleKind::Monthly);
                assert_eq!(index, 360);
                assert_eq!(len, 360);
            }
            other => panic!("Expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_year_out_of_range() {
        let table = demo_table();
        assert!(table.year(29).is_ok());
        assert!(matches!(
            table.year(30),
            Err(MortgageError::IndexOutOfRange {
                schedule: ScheduleKind::Yearly,
                ..
            })
        ));
    }

    #[test]
    fn test_summary_totals() {
        let table = demo_table();
        let summary = table.summary();

        assert_eq!(summary.months, 360);
        assert_eq!(summary.years, 30);
        assert_eq!(summary.monthly_payment, table.monthly_payment());
        assert_eq!(
            summary.total_paid,
            table.monthly_payment() * Decimal::from(360)
        );
        assert!((summary.total_principal - dec!(200_000)).abs() < dec!(1));
        assert!(summary.residual_balance.abs() < dec!(0.01));
        // ~$131.4k of interest over 30 years
        assert!(
            (summary.total_interest - dec!(131_403.75)).abs() < dec!(0.5),
            "got {}",
            summary.total_interest
        );
    }

    #[test]
    fn test_overflow_is_a_calculation_error() {
        let principal = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let terms = LoanTerms::new(principal, 1, dec!(12)).unwrap();
        match PaymentTable::build(terms) {
            Err(MortgageError::CalculationError(msg)) => assert!(msg.contains("overflows")),
            other => panic!("Expected CalculationError, got {other:?}"),
        }
    }
}
