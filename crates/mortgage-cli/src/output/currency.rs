use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Whole-dollar currency: `$196,291`, `-$3`. Halves round away from zero.
pub fn format_currency(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    match whole.to_i64() {
        Some(n) if n < 0 => format!("-${}", n.unsigned_abs().to_formatted_string(&Locale::en)),
        Some(n) => format!("${}", n.to_formatted_string(&Locale::en)),
        None => format!("${whole}"),
    }
}
