//! Input checks for callers that collect loan terms from users.
//!
//! The schedule builder itself accepts anything and lets degenerate values
//! propagate; front ends call [`validate_parameters`] before building to
//! reject terms that would produce a meaningless schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::AmortError;
use crate::schedule::LoanParameters;
use crate::AmortResult;

const MAX_RATE_PCT: Decimal = dec!(100);

pub fn validate_parameters(params: &LoanParameters) -> AmortResult<()> {
    if params.loan_amount <= Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if params.term_months == 0 {
        return Err(AmortError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    if params.grace_period_months() >= params.term_months {
        return Err(AmortError::InvalidInput {
            field: "grace_period_years".into(),
            reason: format!(
                "Grace period ({} months) must be shorter than the term ({} months)",
                params.grace_period_months(),
                params.term_months
            ),
        });
    }
    validate_rate("floating_rate", params.floating_rate)?;
    if params.monthly_income < Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "monthly_income".into(),
            reason: "Monthly income cannot be negative".into(),
        });
    }

    for (i, promo) in params.promotional_rates.iter().enumerate() {
        if promo.from_year == 0 {
            return Err(AmortError::InvalidInput {
                field: format!("promotional_rates[{i}].from_year"),
                reason: "Loan years start at 1".into(),
            });
        }
        if promo.from_year > promo.to_year {
            return Err(AmortError::InvalidInput {
                field: format!("promotional_rates[{i}].to_year"),
                reason: format!(
                    "Window ends (year {}) before it starts (year {})",
                    promo.to_year, promo.from_year
                ),
            });
        }
        validate_rate(&format!("promotional_rates[{i}].rate"), promo.rate)?;
    }

    for (i, band) in params.penalty_rates.iter().enumerate() {
        if band.before_year == 0 {
            return Err(AmortError::InvalidInput {
                field: format!("penalty_rates[{i}].before_year"),
                reason: "Loan years start at 1".into(),
            });
        }
        validate_rate(&format!("penalty_rates[{i}].penalty_rate"), band.penalty_rate)?;
    }

    Ok(())
}

fn validate_rate(field: &str, rate: Decimal) -> AmortResult<()> {
    if rate < Decimal::ZERO || rate > MAX_RATE_PCT {
        return Err(AmortError::InvalidInput {
            field: field.into(),
            reason: format!("Rate must be between 0% and {MAX_RATE_PCT}%, got {rate}%"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{PenaltyRate, PromotionalRate};

    fn valid() -> LoanParameters {
        LoanParameters {
            loan_amount: dec!(2_000_000_000),
            term_months: 240,
            grace_period_years: 1,
            promotional_rates: vec![
                PromotionalRate { from_year: 1, to_year: 1, rate: dec!(5.2) },
                PromotionalRate { from_year: 2, to_year: 3, rate: dec!(6.7) },
            ],
            floating_rate: dec!(10),
            monthly_income: dec!(60_000_000),
            penalty_rates: vec![PenaltyRate { before_year: 3, penalty_rate: dec!(3) }],
        }
    }

    fn invalid_field(params: &LoanParameters) -> String {
        match validate_parameters(params) {
            Err(AmortError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_parameters() {
        assert!(validate_parameters(&valid()).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let params = LoanParameters { loan_amount: dec!(0), ..valid() };
        assert_eq!(invalid_field(&params), "loan_amount");
    }

    #[test]
    fn test_rejects_grace_covering_term() {
        let params = LoanParameters { grace_period_years: 20, ..valid() };
        assert_eq!(invalid_field(&params), "grace_period_years");
    }

    #[test]
    fn test_rejects_inverted_window() {
        let mut params = valid();
        params.promotional_rates[1] = PromotionalRate { from_year: 4, to_year: 2, rate: dec!(6) };
        assert_eq!(invalid_field(&params), "promotional_rates[1].to_year");
    }

    #[test]
    fn test_rejects_negative_penalty() {
        let mut params = valid();
        params.penalty_rates[0].penalty_rate = dec!(-1);
        assert_eq!(invalid_field(&params), "penalty_rates[0].penalty_rate");
    }

    #[test]
    fn test_rejects_year_zero() {
        let mut params = valid();
        params.penalty_rates[0].before_year = 0;
        assert_eq!(invalid_field(&params), "penalty_rates[0].before_year");
    }
}
