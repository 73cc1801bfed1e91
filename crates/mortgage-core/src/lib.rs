//! Fixed-rate mortgage amortization.
//!
//! [`LoanTerms`] holds the validated inputs of a single loan and
//! [`PaymentTable`] derives the level monthly payment, the month-by-month
//! schedule and its year-by-year aggregation. All math in `rust_decimal::Decimal`.

pub mod amortization;
pub mod error;
pub mod loan;
pub mod types;

pub use amortization::{Granularity, PaymentRow, PaymentTable, ScheduleSummary};
pub use error::{MortgageError, ScheduleKind};
pub use loan::LoanTerms;
pub use types::*;

/// Standard result type for all mortgage calculations
pub type MortgageResult<T> = Result<T, MortgageError>;
