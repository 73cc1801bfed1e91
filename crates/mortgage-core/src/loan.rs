use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Months per year; the periodic rate is the annual rate over this.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The three inputs of a fixed-rate loan.
///
/// Fields are private: once constructed the terms cannot change, so a
/// schedule built from them stays consistent with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLoanTerms")]
pub struct LoanTerms {
    principal: Money,
    term_months: u32,
    annual_rate: Rate,
}

/// Unvalidated wire form, only used to route deserialization through `new`.
#[derive(Deserialize)]
struct RawLoanTerms {
    principal: Money,
    term_months: u32,
    annual_rate: Rate,
}

impl TryFrom<RawLoanTerms> for LoanTerms {
    type Error = MortgageError;

    fn try_from(raw: RawLoanTerms) -> MortgageResult<Self> {
        LoanTerms::new(raw.principal, raw.term_months, raw.annual_rate)
    }
}

impl LoanTerms {
    /// Validate and build loan terms. `annual_rate` is in decimal form
    /// (0.037 for 3.7%), `term_months` is the number of monthly payments.
    pub fn new(principal: Money, term_months: u32, annual_rate: Rate) -> MortgageResult<Self> {
        if principal <= Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if term_months == 0 {
            return Err(MortgageError::InvalidInput {
                field: "term_months".into(),
                reason: "Term must be at least 1 month".into(),
            });
        }
        if annual_rate < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "annual_rate".into(),
                reason: "Annual rate cannot be negative".into(),
            });
        }

        Ok(Self {
            principal,
            term_months,
            annual_rate,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    /// Monthly rate applied to the outstanding balance.
    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate / Decimal::from(MONTHS_PER_YEAR)
    }

    /// Number of yearly rows: ceil(term_months / 12).
    pub fn term_years(&self) -> u32 {
        self.term_months.div_ceil(MONTHS_PER_YEAR)
    }

    pub fn is_zero_rate(&self) -> bool {
        self.annual_rate.is_zero()
    }
}

impl Default for LoanTerms {
    /// $200k over 30 years at 3.7%.
    fn default() -> Self {
        Self {
            principal: dec!(200_000),
            term_months: 360,
            annual_rate: dec!(0.037),
        }
    }
}
