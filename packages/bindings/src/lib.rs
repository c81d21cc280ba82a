use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use amort_core::{LoanParameters, PenaltyRate, PromotionalRate, ScheduleEntry};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_params(input_json: &str) -> NapiResult<LoanParameters> {
    LoanParameters::from_json(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let schedule = amort_core::build_schedule(&params);
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct SummaryRequest {
    schedule: Vec<ScheduleEntry>,
    #[serde(default, alias = "promotionalRates")]
    promotional_rates: Vec<PromotionalRate>,
}

#[napi]
pub fn summarize(input_json: String) -> NapiResult<String> {
    let request: SummaryRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let summary = amort_core::summarize(&request.schedule, &request.promotional_rates);
    serde_json::to_string(&summary).map_err(to_napi_error)
}

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let output = amort_core::analyze_loan(&params);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Returns `"ok"` or rejects with the first problem found.
#[napi]
pub fn validate_parameters(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    amort_core::validate_parameters(&params).map_err(to_napi_error)?;
    Ok("ok".to_string())
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RateRequest {
    month: u32,
    #[serde(default, alias = "promotionalRates")]
    promotional_rates: Vec<PromotionalRate>,
    #[serde(default, alias = "floatingRate")]
    floating_rate: Decimal,
}

#[derive(Deserialize)]
struct PenaltyRequest {
    month: u32,
    #[serde(default, alias = "penaltyRates")]
    penalty_rates: Vec<PenaltyRate>,
}

/// Annual rate in percent, as a decimal string.
#[napi]
pub fn rate_for_month(input_json: String) -> NapiResult<String> {
    let request: RateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rate = amort_core::rate_for_month(
        request.month,
        &request.promotional_rates,
        request.floating_rate,
    );
    Ok(rate.to_string())
}

/// Early-repayment penalty in percent, as a decimal string.
#[napi]
pub fn penalty_for_month(input_json: String) -> NapiResult<String> {
    let request: PenaltyRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(amort_core::penalty_for_month(request.month, &request.penalty_rates).to_string())
}
