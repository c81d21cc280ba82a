//! Debt-to-income view of a schedule summary.
//!
//! Purely informational: income never feeds back into principal or interest.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::summary::Summary;
use crate::types::{Money, Percent};

/// Payment-to-income ratio (percent) above which a schedule is flagged.
/// Lenders typically cap this between 50% and 70%.
pub const AFFORDABILITY_WARNING_PCT: Decimal = dec!(70);

/// Share of monthly income consumed by the average payment in each phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityReport {
    pub monthly_income: Money,
    /// Average payment over the whole term as percent of income.
    pub income_ratio: Percent,
    pub income_ratio_promotional: Percent,
    pub income_ratio_floating: Percent,
    /// Income left after the average promotional-phase payment.
    pub remaining_after_promotional: Money,
    /// Income left after the average floating-phase payment.
    pub remaining_after_floating: Money,
    pub has_floating_phase: bool,
    pub exceeds_threshold: bool,
}

/// Compare the summary's average payments against `monthly_income`.
///
/// Ratios are zero when there is no income to compare against.
pub fn affordability_report(summary: &Summary, monthly_income: Money) -> AffordabilityReport {
    let income_ratio = payment_ratio(summary.avg_monthly_payment, monthly_income);

    AffordabilityReport {
        monthly_income,
        income_ratio,
        income_ratio_promotional: payment_ratio(
            summary.avg_monthly_payment_promotional,
            monthly_income,
        ),
        income_ratio_floating: payment_ratio(summary.avg_monthly_payment_floating, monthly_income),
        remaining_after_promotional: monthly_income - summary.avg_monthly_payment_promotional,
        remaining_after_floating: monthly_income - summary.avg_monthly_payment_floating,
        has_floating_phase: summary.floating_months > 0,
        exceeds_threshold: monthly_income > Decimal::ZERO
            && income_ratio > AFFORDABILITY_WARNING_PCT,
    }
}

fn payment_ratio(payment: Money, income: Money) -> Percent {
    if income > Decimal::ZERO {
        payment / income * dec!(100)
    } else {
        Decimal::ZERO
    }
}
