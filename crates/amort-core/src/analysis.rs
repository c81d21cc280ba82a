//! One-call loan analysis: schedule, summary and affordability wrapped in the
//! standard computation envelope with warnings for terms worth a second look.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::affordability::{affordability_report, AffordabilityReport, AFFORDABILITY_WARNING_PCT};
use crate::schedule::{build_schedule, LoanParameters, ScheduleEntry};
use crate::summary::{summarize, Summary};
use crate::types::{with_metadata, ComputationOutput};

const METHODOLOGY: &str = "Level-principal amortization: equal principal installments after an \
                           interest-only grace period, simple monthly interest on the opening \
                           balance at the promotional or floating annual rate";

/// Everything a front end needs to render a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    /// Opening row followed by one row per month.
    pub schedule: Vec<ScheduleEntry>,
    pub summary: Summary,
    pub affordability: AffordabilityReport,
}

/// Build the schedule, summarize it and assess affordability.
///
/// Never fails: questionable terms are reported as warnings rather than
/// rejected. Use [`crate::validate_parameters`] to reject them up front.
pub fn analyze_loan(params: &LoanParameters) -> ComputationOutput<LoanAnalysis> {
    let start = Instant::now();

    let schedule = build_schedule(params);
    let summary = summarize(&schedule, &params.promotional_rates);
    let affordability = affordability_report(&summary, params.monthly_income);

    let warnings = collect_warnings(params, &schedule, &summary, &affordability);
    for warning in &warnings {
        tracing::debug!(%warning, "analysis warning");
    }

    let analysis = LoanAnalysis {
        schedule,
        summary,
        affordability,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(METHODOLOGY, params, warnings, elapsed, analysis)
}

fn collect_warnings(
    params: &LoanParameters,
    schedule: &[ScheduleEntry],
    summary: &Summary,
    affordability: &AffordabilityReport,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if params.term_months > 0 && params.principal_payment_months() <= 0 {
        warnings.push(format!(
            "Grace period of {} months covers the whole {}-month term; principal is never repaid",
            params.grace_period_months(),
            params.term_months
        ));
    }

    if affordability.exceeds_threshold {
        warnings.push(format!(
            "Average payment is {}% of monthly income, above the {}% lenders typically accept",
            affordability.income_ratio.round_dp(1),
            AFFORDABILITY_WARNING_PCT
        ));
    }

    if params.monthly_income > Decimal::ZERO {
        let shortfall_months = schedule
            .iter()
            .filter(|e| e.month > 0 && e.monthly_remaining < Decimal::ZERO)
            .count();
        if shortfall_months > 0 {
            warnings.push(format!(
                "Payment exceeds monthly income in {shortfall_months} of {} months",
                params.term_months
            ));
        }
    }

    if summary.promotional_months > params.term_months {
        warnings.push(format!(
            "Promotional rates extend to month {}, beyond the {}-month term",
            summary.promotional_months, params.term_months
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::PromotionalRate;
    use rust_decimal_macros::dec;

    fn params() -> LoanParameters {
        LoanParameters {
            loan_amount: dec!(1_200_000),
            term_months: 12,
            grace_period_years: 0,
            promotional_rates: vec![],
            floating_rate: dec!(12),
            monthly_income: dec!(500_000),
            penalty_rates: vec![],
        }
    }

    #[test]
    fn test_clean_analysis_has_no_warnings() {
        let output = analyze_loan(&params());
        assert!(output.warnings.is_empty(), "{:?}", output.warnings);
        assert_eq!(output.result.schedule.len(), 13);
        assert_eq!(output.result.summary.total_principal, dec!(1_200_000));
        assert_eq!(output.assumptions["term_months"], 12);
        assert_eq!(output.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_interest_only_warning() {
        let output = analyze_loan(&LoanParameters {
            grace_period_years: 1,
            ..params()
        });
        assert!(output.warnings.iter().any(|w| w.contains("never repaid")));
    }

    #[test]
    fn test_affordability_warnings() {
        let output = analyze_loan(&LoanParameters {
            monthly_income: dec!(110_000),
            ..params()
        });
        assert!(output.result.affordability.exceeds_threshold);
        assert!(output.warnings.iter().any(|w| w.contains("above the 70%")));
        // Months 1-2 pay 112_000 and 111_000
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("exceeds monthly income in 2 of 12 months")));
    }

    #[test]
    fn test_promotional_window_past_term_warning() {
        let output = analyze_loan(&LoanParameters {
            promotional_rates: vec![PromotionalRate {
                from_year: 1,
                to_year: 2,
                rate: dec!(6),
            }],
            ..params()
        });
        assert!(output.warnings.iter().any(|w| w.contains("month 24")));
    }
}
