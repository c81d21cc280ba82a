//! Month-by-month level-principal schedule.
//!
//! Principal is repaid in equal monthly installments after an optional
//! interest-only grace period. Interest each month is simple interest on the
//! balance outstanding at the start of the month. Alongside the cash flows,
//! every row carries running totals, the borrower's income headroom and the
//! cost of settling the loan in full right after that month's payment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::rates::{penalty_for_month, rate_for_month, PenaltyRate, PromotionalRate};
use crate::types::{Money, Percent};
use crate::AmortResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Loan terms for one schedule computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Principal borrowed.
    #[serde(alias = "loanAmount")]
    pub loan_amount: Money,
    /// Number of scheduled monthly payments.
    #[serde(alias = "termMonths")]
    pub term_months: u32,
    /// Interest-only years at the start of the loan.
    #[serde(default, alias = "gracePeriodYears")]
    pub grace_period_years: u32,
    /// Preferential windows, matched in list order.
    #[serde(default, alias = "promotionalRates")]
    pub promotional_rates: Vec<PromotionalRate>,
    /// Annual rate (percent) outside every promotional window.
    #[serde(alias = "floatingRate")]
    pub floating_rate: Percent,
    /// Monthly income set aside for repayment. Reporting only.
    #[serde(default, alias = "monthlyIncome")]
    pub monthly_income: Money,
    /// Early-repayment penalty bands.
    #[serde(default, alias = "penaltyRates")]
    pub penalty_rates: Vec<PenaltyRate>,
}

impl LoanParameters {
    /// Parse parameters from a JSON document.
    pub fn from_json(json: &str) -> AmortResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn grace_period_months(&self) -> u32 {
        self.grace_period_years.saturating_mul(12)
    }

    /// Months over which principal is actually repaid. Negative when the grace
    /// period outlasts the term.
    pub fn principal_payment_months(&self) -> i64 {
        i64::from(self.term_months) - i64::from(self.grace_period_months())
    }

    /// Fixed principal installment for every non-grace month. Zero when there
    /// are no repayment months, which leaves the loan interest-only for life.
    pub fn monthly_principal(&self) -> Money {
        let months = self.principal_payment_months();
        if months > 0 {
            self.loan_amount / Decimal::from(months)
        } else {
            Decimal::ZERO
        }
    }
}

/// One row of the schedule. Row 0 is the opening position before any payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    pub principal_start: Money,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub total_payment: Money,
    pub principal_end: Money,
    /// Annual rate (percent) applied this month; 0 for the opening row.
    pub annual_rate: Percent,
    pub is_grace_period: bool,
    pub accumulated_principal: Money,
    pub accumulated_interest: Money,
    pub total_paid_so_far: Money,
    /// Income left after this month's payment. Negative when the payment
    /// exceeds income.
    pub monthly_remaining: Money,
    pub accumulated_savings: Money,
    /// Penalty (percent of remaining principal) for settling after this month.
    pub penalty_rate: Percent,
    pub penalty_amount: Money,
    /// Everything paid so far plus the remaining balance and penalty.
    pub total_settlement_cost: Money,
}

impl ScheduleEntry {
    /// Opening row: nothing paid, full balance outstanding.
    fn opening(params: &LoanParameters) -> Self {
        Self {
            month: 0,
            principal_start: params.loan_amount,
            principal_payment: Decimal::ZERO,
            interest_payment: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            principal_end: params.loan_amount,
            annual_rate: Decimal::ZERO,
            is_grace_period: false,
            accumulated_principal: Decimal::ZERO,
            accumulated_interest: Decimal::ZERO,
            total_paid_so_far: Decimal::ZERO,
            monthly_remaining: params.monthly_income,
            accumulated_savings: Decimal::ZERO,
            penalty_rate: Decimal::ZERO,
            penalty_amount: Decimal::ZERO,
            total_settlement_cost: params.loan_amount,
        }
    }
}

/// Running state threaded from one month to the next.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    remaining_principal: Money,
    principal_paid: Money,
    interest_paid: Money,
    savings: Money,
}

impl Accumulator {
    fn new(loan_amount: Money) -> Self {
        Self {
            remaining_principal: loan_amount,
            principal_paid: Decimal::ZERO,
            interest_paid: Decimal::ZERO,
            savings: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full schedule: the opening row followed by one row per month,
/// `term_months + 1` entries in month order.
///
/// Inputs are not validated. Degenerate terms fall out of the arithmetic: a
/// grace period covering the whole term yields an interest-only schedule and
/// a zero loan amount yields an all-zero schedule.
pub fn build_schedule(params: &LoanParameters) -> Vec<ScheduleEntry> {
    let grace_months = params.grace_period_months();
    let monthly_principal = params.monthly_principal();

    let mut schedule = Vec::with_capacity(params.term_months as usize + 1);
    schedule.push(ScheduleEntry::opening(params));

    let mut acc = Accumulator::new(params.loan_amount);

    for month in 1..=params.term_months {
        let (entry, next) = schedule_month(params, month, grace_months, monthly_principal, acc);
        schedule.push(entry);
        acc = next;
    }

    tracing::debug!(
        term_months = params.term_months,
        grace_months,
        %monthly_principal,
        total_interest = %acc.interest_paid,
        "schedule built"
    );

    schedule
}

/// Compute one month's row from the state left by the previous month.
fn schedule_month(
    params: &LoanParameters,
    month: u32,
    grace_months: u32,
    monthly_principal: Money,
    acc: Accumulator,
) -> (ScheduleEntry, Accumulator) {
    let principal_start = acc.remaining_principal;

    let annual_rate = rate_for_month(month, &params.promotional_rates, params.floating_rate);
    let monthly_rate = annual_rate / PERCENT / MONTHS_PER_YEAR;
    let interest_payment = principal_start * monthly_rate;

    let is_grace_period = month <= grace_months;
    let principal_payment = if is_grace_period {
        Decimal::ZERO
    } else {
        monthly_principal
    };
    let total_payment = principal_payment + interest_payment;

    // Clamp absorbs residue on the final installment.
    let principal_end = (principal_start - principal_payment).max(Decimal::ZERO);

    let next = Accumulator {
        remaining_principal: principal_end,
        principal_paid: acc.principal_paid + principal_payment,
        interest_paid: acc.interest_paid + interest_payment,
        savings: acc.savings + (params.monthly_income - total_payment),
    };

    let penalty_rate = penalty_for_month(month, &params.penalty_rates);
    let penalty_amount = principal_end * penalty_rate / PERCENT;
    let total_paid_so_far = next.principal_paid + next.interest_paid;

    let entry = ScheduleEntry {
        month,
        principal_start,
        principal_payment,
        interest_payment,
        total_payment,
        principal_end,
        annual_rate,
        is_grace_period,
        accumulated_principal: next.principal_paid,
        accumulated_interest: next.interest_paid,
        total_paid_so_far,
        monthly_remaining: params.monthly_income - total_payment,
        accumulated_savings: next.savings,
        penalty_rate,
        penalty_amount,
        total_settlement_cost: total_paid_so_far + principal_end + penalty_amount,
    };

    (entry, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_loan() -> LoanParameters {
        LoanParameters {
            loan_amount: dec!(1_200_000),
            term_months: 12,
            grace_period_years: 0,
            promotional_rates: vec![],
            floating_rate: dec!(12),
            monthly_income: dec!(150_000),
            penalty_rates: vec![],
        }
    }

    #[test]
    fn test_opening_row() {
        let schedule = build_schedule(&simple_loan());
        let opening = &schedule[0];
        assert_eq!(opening.month, 0);
        assert_eq!(opening.principal_start, dec!(1_200_000));
        assert_eq!(opening.principal_end, dec!(1_200_000));
        assert_eq!(opening.total_payment, Decimal::ZERO);
        assert_eq!(opening.annual_rate, Decimal::ZERO);
        assert!(!opening.is_grace_period);
        assert_eq!(opening.monthly_remaining, dec!(150_000));
        assert_eq!(opening.accumulated_savings, Decimal::ZERO);
        assert_eq!(opening.total_settlement_cost, dec!(1_200_000));
    }

    #[test]
    fn test_first_and_last_month() {
        let schedule = build_schedule(&simple_loan());

        let first = &schedule[1];
        assert_eq!(first.interest_payment, dec!(12_000));
        assert_eq!(first.principal_payment, dec!(100_000));
        assert_eq!(first.total_payment, dec!(112_000));
        assert_eq!(first.principal_end, dec!(1_100_000));
        assert_eq!(first.monthly_remaining, dec!(38_000));

        let last = &schedule[12];
        assert_eq!(last.principal_end, Decimal::ZERO);
        assert_eq!(last.accumulated_principal, dec!(1_200_000));
        // 1% of 100_000 on the final balance
        assert_eq!(last.interest_payment, dec!(1_000));
    }

    #[test]
    fn test_accumulated_savings_running_sum() {
        let schedule = build_schedule(&simple_loan());
        let sum: Decimal = schedule[1..=3].iter().map(|e| e.monthly_remaining).sum();
        assert_eq!(schedule[3].accumulated_savings, sum);
    }

    #[test]
    fn test_settlement_cost_with_penalty() {
        let mut params = simple_loan();
        params.penalty_rates = vec![PenaltyRate { before_year: 1, penalty_rate: dec!(2) }];
        let schedule = build_schedule(&params);

        let first = &schedule[1];
        assert_eq!(first.penalty_rate, dec!(2));
        assert_eq!(first.penalty_amount, dec!(22_000));
        assert_eq!(
            first.total_settlement_cost,
            dec!(100_000) + dec!(12_000) + dec!(1_100_000) + dec!(22_000)
        );
    }

    #[test]
    fn test_grace_longer_than_term_is_interest_only() {
        let mut params = simple_loan();
        params.grace_period_years = 2;
        assert_eq!(params.principal_payment_months(), -12);
        assert_eq!(params.monthly_principal(), Decimal::ZERO);

        let schedule = build_schedule(&params);
        assert_eq!(schedule.len(), 13);
        for entry in &schedule[1..] {
            assert!(entry.is_grace_period);
            assert_eq!(entry.principal_payment, Decimal::ZERO);
            assert_eq!(entry.principal_end, dec!(1_200_000));
            assert_eq!(entry.interest_payment, dec!(12_000));
        }
    }

    #[test]
    fn test_zero_loan_amount() {
        let mut params = simple_loan();
        params.loan_amount = Decimal::ZERO;
        let schedule = build_schedule(&params);
        for entry in &schedule[1..] {
            assert_eq!(entry.total_payment, Decimal::ZERO);
            assert_eq!(entry.principal_end, Decimal::ZERO);
            assert_eq!(entry.total_settlement_cost, Decimal::ZERO);
        }
    }

    #[test]
    fn test_zero_term_has_only_opening_row() {
        let mut params = simple_loan();
        params.term_months = 0;
        let schedule = build_schedule(&params);
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_parse_camel_case_json() {
        let json = r#"{
            "loanAmount": 2000000000,
            "termMonths": 240,
            "promotionalRates": [{"fromYear": 1, "toYear": 1, "rate": 5.2}],
            "floatingRate": 10,
            "monthlyIncome": 60000000,
            "penaltyRates": [{"beforeYear": 3, "penaltyRate": 3}]
        }"#;
        let params = LoanParameters::from_json(json).unwrap();
        assert_eq!(params.loan_amount, dec!(2_000_000_000));
        assert_eq!(params.term_months, 240);
        assert_eq!(params.grace_period_years, 0);
        assert_eq!(params.promotional_rates[0].rate, dec!(5.2));
        assert_eq!(params.penalty_rates[0].before_year, 3);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let err = LoanParameters::from_json(r#"{"loan_amount": 1000}"#).unwrap_err();
        assert!(matches!(err, crate::AmortError::SerializationError(_)));
    }
}
