use rust_decimal::{Decimal, MathematicalOps};

use crate::error::MortgageError;
use crate::loan::LoanTerms;
use crate::types::Money;
use crate::MortgageResult;

/// Level monthly payment of a standard fixed-rate mortgage
/// (no balloon, no interest-only period, no rate resets).
///
/// ```text
/// r   = annual_rate / 12
/// df  = (1 + r) ^ term_months
/// pmt = principal * r * df / (df - 1)
/// ```
///
/// A zero-rate loan repays straight-line: `principal / term_months`.
pub fn monthly_payment(terms: &LoanTerms) -> MortgageResult<Money> {
    let months = terms.term_months();
    let periodic_rate = terms.periodic_rate();

    if periodic_rate.is_zero() {
        return Ok(terms.principal() / Decimal::from(months));
    }

    let discount_factor = (Decimal::ONE + periodic_rate)
        .checked_powu(u64::from(months))
        .ok_or_else(|| {
            MortgageError::CalculationError(format!(
                "discount factor (1 + {periodic_rate})^{months} overflows"
            ))
        })?;

    let denominator = discount_factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "payment annuity factor".into(),
        });
    }

    terms
        .principal()
        .checked_mul(periodic_rate)
        .and_then(|x| x.checked_mul(discount_factor))
        .and_then(|x| x.checked_div(denominator))
        .ok_or_else(|| MortgageError::CalculationError("monthly payment overflows".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_30y_at_3_7() {
        let terms = LoanTerms::new(dec!(200_000), 360, dec!(0.037)).unwrap();
        let pmt = monthly_payment(&terms).unwrap();
        assert!(
            (pmt - dec!(920.57)).abs() < dec!(0.005),
            "Expected payment ~920.57, got {}",
            pmt
        );
    }

    #[test]
    fn test_payment_15y_at_5() {
        let terms = LoanTerms::new(dec!(100_000), 180, dec!(0.05)).unwrap();
        let pmt = monthly_payment(&terms).unwrap();
        assert!((pmt - dec!(791)).abs() < dec!(0.5), "got {}", pmt);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let terms = LoanTerms::new(dec!(12_000), 24, Decimal::ZERO).unwrap();
        assert_eq!(monthly_payment(&terms).unwrap(), dec!(500));
    }

    #[test]
    fn test_single_month_repays_with_one_month_interest() {
        // n = 1: pmt = P * r * (1 + r) / r = P * (1 + r)
        let terms = LoanTerms::new(dec!(1200), 1, dec!(0.12)).unwrap();
        let pmt = monthly_payment(&terms).unwrap();
        assert!((pmt - dec!(1212)).abs() < dec!(0.0000001), "got {}", pmt);
    }

    #[test]
    fn test_overflowing_discount_factor_is_an_error() {
        let terms = LoanTerms::new(dec!(1000), 100_000, dec!(120)).unwrap();
        assert!(matches!(
            monthly_payment(&terms),
            Err(MortgageError::CalculationError(_))
        ));
    }
}
