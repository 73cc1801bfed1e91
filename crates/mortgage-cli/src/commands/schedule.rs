use clap::Args;
use log::info;
use rust_decimal_macros::dec;
use serde_json::Value;

use mortgage_core::amortization::{calculate_schedule, ScheduleInput};
use mortgage_core::{Granularity, LoanTerms, Money, Rate};

use crate::input;

/// Demonstration loan: $200k over 30 years at 3.7%.
pub const DEMO_PRINCIPAL: Money = dec!(200_000);
pub const DEMO_TERM_MONTHS: u32 = 360;
pub const DEMO_ANNUAL_RATE: Rate = dec!(0.037);

/// Arguments for a single loan's payment table
#[derive(Args, Debug, Default)]
pub struct ScheduleArgs {
    /// Loan amount, e.g. 200000
    #[arg(requires_all = ["years", "rate"])]
    pub principal: Option<String>,

    /// Term in whole years, e.g. 30
    #[arg(requires_all = ["principal", "rate"])]
    pub years: Option<String>,

    /// Annual interest rate in percent, e.g. 3.7
    #[arg(requires_all = ["principal", "years"])]
    pub rate: Option<String>,

    /// Show the month-by-month schedule instead of yearly totals
    #[arg(long)]
    pub monthly: bool,

    /// JSON or YAML loan file ({principal, term_months, annual_rate}), or `-`
    /// to read a JSON loan or a `principal,years,rate` record from stdin
    #[arg(long, conflicts_with = "principal")]
    pub input: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let granularity = if args.monthly {
        Granularity::Monthly
    } else {
        Granularity::Yearly
    };

    let result = calculate_schedule(&ScheduleInput { terms, granularity })?;
    Ok(serde_json::to_value(result)?)
}

fn resolve_terms(args: &ScheduleArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    match args.input.as_deref() {
        Some(input::STDIN_PATH) => {
            let text = input::stdin::read_stdin()?.ok_or("no loan piped to stdin")?;
            return terms_from_stdin(&text);
        }
        Some(path) => return input::file::read_loan(path),
        None => {}
    }

    if let (Some(principal), Some(years), Some(rate)) = (&args.principal, &args.years, &args.rate) {
        return Ok(input::record::parse_fields(principal, years, rate).into_terms()?);
    }

    info!("no loan given, using the demonstration loan");
    Ok(LoanTerms::new(DEMO_PRINCIPAL, DEMO_TERM_MONTHS, DEMO_ANNUAL_RATE)?)
}

/// Piped stdin holds either a JSON loan object or one `principal,years,rate` record.
fn terms_from_stdin(text: &str) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    if text.starts_with('{') {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(input::record::parse_record(text).into_terms()?)
    }
}
