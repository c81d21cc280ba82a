use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use amort_core::rates::{loan_year, penalty_for_month, rate_for_month};
use amort_core::{
    affordability_report, analyze_loan, build_schedule, summarize, validate_parameters,
    LoanParameters, PenaltyRate, PromotionalRate,
};

use crate::input;
use crate::output::paging::{self, PageWindow};

/// Loan terms, from a parameter file, piped JSON, or individual flags
#[derive(Args)]
pub struct LoanArgs {
    /// Path to a JSON or YAML parameter file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal borrowed
    #[arg(long, default_value = "2000000000")]
    pub loan_amount: Decimal,

    /// Loan term in years
    #[arg(long, default_value_t = 20)]
    pub term_years: u32,

    /// Loan term in months (overrides --term-years)
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Interest-only years at the start of the loan
    #[arg(long, default_value_t = 0)]
    pub grace_years: u32,

    /// Annual floating rate in percent
    #[arg(long, default_value = "10")]
    pub floating_rate: Decimal,

    /// Monthly income available for repayment
    #[arg(long, default_value = "60000000")]
    pub monthly_income: Decimal,

    /// Promotional windows as FROM-TO:RATE (comma-separated, first match wins)
    #[arg(
        long = "promo",
        value_delimiter = ',',
        default_value = "1-1:5.2,2-3:6.7",
        value_parser = parse_promotional_rate
    )]
    pub promotional_rates: Vec<PromotionalRate>,

    /// Drop all promotional windows
    #[arg(long)]
    pub no_promo: bool,

    /// Early-repayment penalty bands as BEFORE_YEAR:PERCENT (comma-separated)
    #[arg(
        long = "penalty",
        value_delimiter = ',',
        default_value = "3:3,5:1",
        value_parser = parse_penalty_rate
    )]
    pub penalty_rates: Vec<PenaltyRate>,

    /// Drop all early-repayment penalty bands
    #[arg(long)]
    pub no_penalty: bool,

    /// Skip input validation and compute whatever the terms produce
    #[arg(long)]
    pub no_validate: bool,
}

impl LoanArgs {
    /// Resolve loan parameters: file first, then piped stdin, then flags.
    fn resolve(&self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        let params: LoanParameters = if let Some(ref path) = self.input {
            input::file::read_document(path)?
        } else if let Some(data) = input::stdin::read_stdin()? {
            serde_json::from_value(data)?
        } else {
            self.params_from_flags()
        };

        if !self.no_validate {
            validate_parameters(&params)?;
        }
        Ok(params)
    }

    fn params_from_flags(&self) -> LoanParameters {
        LoanParameters {
            loan_amount: self.loan_amount,
            term_months: self
                .term_months
                .unwrap_or_else(|| self.term_years.saturating_mul(12)),
            grace_period_years: self.grace_years,
            promotional_rates: if self.no_promo {
                Vec::new()
            } else {
                self.promotional_rates.clone()
            },
            floating_rate: self.floating_rate,
            monthly_income: self.monthly_income,
            penalty_rates: if self.no_penalty {
                Vec::new()
            } else {
                self.penalty_rates.clone()
            },
        }
    }
}

/// Which months of the schedule to print and which column groups to keep
#[derive(Args)]
pub struct ViewArgs {
    /// Page of the schedule to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Months per page (12, 24, 36 and 60 read well)
    #[arg(long, default_value_t = 24)]
    pub page_size: u32,

    /// Show every month instead of a single page
    #[arg(long)]
    pub all: bool,

    /// Include income columns (remaining after payment, accumulated savings)
    #[arg(long)]
    pub show_income: bool,

    /// Include early-repayment columns (penalty rate, penalty, settlement cost)
    #[arg(long)]
    pub show_early_repayment: bool,
}

/// Arguments for the full month-by-month schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub view: ViewArgs,
}

/// Arguments for the summary and affordability report
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for a single-month rate lookup
#[derive(Args)]
pub struct RateArgs {
    /// Loan month (1-based)
    #[arg(long)]
    pub month: u32,

    #[command(flatten)]
    pub loan: LoanArgs,
}

const INCOME_COLUMNS: [&str; 2] = ["monthly_remaining", "accumulated_savings"];
const EARLY_REPAYMENT_COLUMNS: [&str; 3] =
    ["penalty_rate", "penalty_amount", "total_settlement_cost"];

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.loan.resolve()?;
    let output = analyze_loan(&params);

    let total_months = params.term_months;
    let window = if args.view.all {
        PageWindow::everything(total_months)
    } else {
        paging::paginate(total_months, args.view.page, args.view.page_size)
    };

    let mut value = serde_json::to_value(&output)?;
    let rows: Vec<Value> = output
        .result
        .schedule
        .iter()
        .filter(|entry| window.contains(entry.month))
        .map(|entry| {
            let mut row = serde_json::to_value(entry)?;
            if let Value::Object(ref mut map) = row {
                map.retain(|column, _| {
                    let column = column.as_str();
                    (args.view.show_income || !INCOME_COLUMNS.contains(&column))
                        && (args.view.show_early_repayment
                            || !EARLY_REPAYMENT_COLUMNS.contains(&column))
                });
            }
            Ok(row)
        })
        .collect::<Result<_, serde_json::Error>>()?;

    value["result"]["schedule"] = Value::Array(rows);
    value["result"]["page"] = serde_json::to_value(window)?;
    Ok(value)
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.loan.resolve()?;
    let schedule = build_schedule(&params);
    let summary = summarize(&schedule, &params.promotional_rates);
    let affordability = affordability_report(&summary, params.monthly_income);

    Ok(json!({
        "result": {
            "summary": summary,
            "affordability": affordability,
        }
    }))
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.loan.resolve()?;
    if args.month == 0 {
        return Err("--month must be at least 1".into());
    }

    Ok(json!({
        "result": {
            "month": args.month,
            "year": loan_year(args.month),
            "annual_rate": rate_for_month(args.month, &params.promotional_rates, params.floating_rate),
            "penalty_rate": penalty_for_month(args.month, &params.penalty_rates),
        }
    }))
}

/// Parse `FROM-TO:RATE`, e.g. `2-3:6.7`. A single year (`1:5.2`) covers just
/// that year.
pub fn parse_promotional_rate(s: &str) -> Result<PromotionalRate, String> {
    let (years, rate) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected FROM-TO:RATE, got '{s}'"))?;
    let (from, to) = match years.split_once('-') {
        Some((from, to)) => (from, to),
        None => (years, years),
    };

    Ok(PromotionalRate {
        from_year: parse_year(from)?,
        to_year: parse_year(to)?,
        rate: parse_percent(rate)?,
    })
}

/// Parse `BEFORE_YEAR:PERCENT`, e.g. `3:3`.
pub fn parse_penalty_rate(s: &str) -> Result<PenaltyRate, String> {
    let (year, rate) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected BEFORE_YEAR:PERCENT, got '{s}'"))?;

    Ok(PenaltyRate {
        before_year: parse_year(year)?,
        penalty_rate: parse_percent(rate)?,
    })
}

fn parse_year(s: &str) -> Result<u32, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("invalid year '{}'", s.trim()))
}

fn parse_percent(s: &str) -> Result<Decimal, String> {
    s.trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("invalid rate '{}'", s.trim()))
}
