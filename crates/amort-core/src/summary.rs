//! Lifetime totals and phase averages over a completed schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::{max_promotional_year, PromotionalRate};
use crate::schedule::ScheduleEntry;
use crate::types::Money;

/// Aggregate view of a schedule.
///
/// The promotional window runs from month 1 to the last year covered by any
/// promotional rule; everything after it is the floating window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub avg_monthly_payment: Money,
    pub avg_monthly_payment_promotional: Money,
    pub avg_monthly_payment_floating: Money,
    /// Length of the promotional window in months. May exceed the term.
    pub promotional_months: u32,
    /// Scheduled months after the promotional window. Never negative.
    pub floating_months: u32,
}

/// Summarize a schedule produced by [`crate::build_schedule`].
///
/// The opening row is ignored. A schedule with no payment months yields an
/// all-zero summary.
pub fn summarize(schedule: &[ScheduleEntry], promotional_rates: &[PromotionalRate]) -> Summary {
    let payments: Vec<&ScheduleEntry> = schedule.iter().filter(|e| e.month > 0).collect();
    if payments.is_empty() {
        return Summary::default();
    }

    let month_count = payments.len() as u32;
    let total_principal: Money = payments.iter().map(|e| e.principal_payment).sum();
    let total_interest: Money = payments.iter().map(|e| e.interest_payment).sum();
    let total_payment = total_principal + total_interest;
    let avg_monthly_payment = total_payment / Decimal::from(month_count);

    let promotional_months = max_promotional_year(promotional_rates).saturating_mul(12);

    let (promotional, floating): (Vec<&ScheduleEntry>, Vec<&ScheduleEntry>) = payments
        .iter()
        .copied()
        .partition(|e| e.month <= promotional_months);

    let summary = Summary {
        total_principal,
        total_interest,
        total_payment,
        avg_monthly_payment,
        avg_monthly_payment_promotional: average_payment(&promotional),
        avg_monthly_payment_floating: average_payment(&floating),
        promotional_months,
        floating_months: month_count.saturating_sub(promotional_months),
    };

    tracing::debug!(
        month_count,
        promotional_months,
        floating_months = summary.floating_months,
        total_interest = %summary.total_interest,
        "schedule summarized"
    );

    summary
}

fn average_payment(entries: &[&ScheduleEntry]) -> Money {
    if entries.is_empty() {
        return Decimal::ZERO;
    }
    let total: Money = entries.iter().map(|e| e.total_payment).sum();
    total / Decimal::from(entries.len() as u64)
}
