use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use green_credit_core::amortization;
use green_credit_core::offers::analysis::analyze_loan as core_analyze_loan;
use green_credit_core::offers::validation::{validate_offers as core_validate_offers, OfferBatchInput};
use green_credit_core::savings::{calculate_savings as core_calculate_savings, SavingsInput};
use green_credit_core::LoanTerms;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct PaymentRequest {
    principal: Decimal,
    annual_rate_pct: Decimal,
    term_months: u32,
}

#[derive(Deserialize)]
struct TermRequest {
    principal: Decimal,
    annual_rate_pct: Decimal,
    fixed_monthly_payment: Decimal,
}

#[derive(Serialize)]
struct TermResponse {
    feasible: bool,
    term_months: Option<u32>,
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let req: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = amortization::monthly_payment(req.principal, req.annual_rate_pct, req.term_months);
    serde_json::to_string(&payment).map_err(to_napi_error)
}

#[napi]
pub fn months_from_payment(input_json: String) -> NapiResult<String> {
    let req: TermRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let term = amortization::months_from_payment(
        req.principal,
        req.annual_rate_pct,
        req.fixed_monthly_payment,
    );
    let response = TermResponse {
        feasible: term.is_some(),
        term_months: term,
    };
    serde_json::to_string(&response).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Offers
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let input: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = core_analyze_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_offers(input_json: String) -> NapiResult<String> {
    let input: OfferBatchInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = core_validate_offers(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_savings(input_json: String) -> NapiResult<String> {
    let input: SavingsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = core_calculate_savings(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
