//! Rate resolution for a given loan month.
//!
//! Two lookups drive every month of a schedule: the annual interest rate
//! (promotional windows falling back to the floating rate) and the
//! early-repayment penalty band. Both work on 1-indexed loan years, where
//! months 1-12 are year 1, months 13-24 year 2, and so on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

// ---------------------------------------------------------------------------
// Input Types
// ---------------------------------------------------------------------------

/// A preferential annual rate applied to the loan years `from_year..=to_year`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionalRate {
    #[serde(alias = "fromYear")]
    pub from_year: u32,
    #[serde(alias = "toYear")]
    pub to_year: u32,
    /// Annual rate in percent.
    pub rate: Percent,
}

/// Early-repayment penalty charged on the outstanding balance while the loan
/// year is at or before `before_year`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRate {
    #[serde(alias = "beforeYear")]
    pub before_year: u32,
    /// Penalty in percent of the remaining principal.
    #[serde(alias = "penaltyRate")]
    pub penalty_rate: Percent,
}

impl PromotionalRate {
    pub fn covers(&self, year: u32) -> bool {
        self.from_year <= year && year <= self.to_year
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Loan year containing `month`: `ceil(month / 12)`. Month 0 maps to year 0.
pub fn loan_year(month: u32) -> u32 {
    month.div_ceil(12)
}

/// Annual rate (percent) applicable to `month`.
///
/// Promotional rules are scanned in the order given and the first rule whose
/// year range contains the month wins, so callers can express overrides by
/// listing the more specific window first. Rules with `from_year > to_year`
/// never match. Months outside every window pay `floating_rate`.
pub fn rate_for_month(
    month: u32,
    promotional_rates: &[PromotionalRate],
    floating_rate: Percent,
) -> Percent {
    let year = loan_year(month);

    promotional_rates
        .iter()
        .find(|promo| promo.covers(year))
        .map(|promo| promo.rate)
        .unwrap_or(floating_rate)
}

/// Early-repayment penalty (percent) applicable after paying `month`.
///
/// Bands are evaluated from the soonest-expiring `before_year` upwards, so the
/// strictest band wins during the early years and the charge steps down as
/// bands expire. The caller's slice is left untouched. Zero once every band
/// has expired.
pub fn penalty_for_month(month: u32, penalty_rates: &[PenaltyRate]) -> Percent {
    let year = loan_year(month);

    let mut bands: Vec<&PenaltyRate> = penalty_rates.iter().collect();
    bands.sort_by_key(|band| band.before_year);

    bands
        .into_iter()
        .find(|band| year <= band.before_year)
        .map(|band| band.penalty_rate)
        .unwrap_or(Decimal::ZERO)
}

/// Last loan year covered by any promotional window, 0 when there are none.
pub fn max_promotional_year(promotional_rates: &[PromotionalRate]) -> u32 {
    promotional_rates
        .iter()
        .map(|promo| promo.to_year)
        .max()
        .unwrap_or(0)
}
