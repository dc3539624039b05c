use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::amortization::{interest_only_payment, months_from_payment};
use crate::error::Rejection;
use crate::offers::policy::OfferPolicy;
use crate::{GreenCreditError, GreenCreditResult, types::*};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferBatchInput {
    #[serde(alias = "creditOffers")]
    pub offers: Vec<LoanTerms>,
    #[serde(default)]
    pub policy: OfferPolicy,
}

/// An offer that was turned away, keyed by its position in the input batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedOffer {
    pub index: usize,
    #[serde(flatten)]
    pub rejection: Rejection,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferBatchOutput {
    pub accepted: Vec<LoanTerms>,
    pub rejected: Vec<RejectedOffer>,
    pub accepted_count: usize,
    pub rejected_count: usize,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Recompute the term of `offer` under the default policy.
pub fn correct(offer: &LoanTerms) -> GreenCreditResult<LoanTerms> {
    correct_with_policy(offer, &OfferPolicy::default())
}

/// Recompute the term implied by the offer's fixed payment and return a new
/// value with only `term_months` replaced.
///
/// Infeasible payments and terms above `policy.max_term_months` come back as
/// business rejections; a non-positive principal or payment is a caller
/// defect and comes back as `InvalidInput`.
pub fn correct_with_policy(
    offer: &LoanTerms,
    policy: &OfferPolicy,
) -> GreenCreditResult<LoanTerms> {
    validate_terms(offer)?;

    let months = months_from_payment(
        offer.principal,
        offer.annual_rate_pct,
        offer.fixed_monthly_payment,
    )
    .ok_or_else(|| GreenCreditError::InfeasiblePayment {
        payment: offer.fixed_monthly_payment,
        interest_only: interest_only_payment(offer.principal, offer.annual_rate_pct),
    })?;

    if months > policy.max_term_months {
        return Err(GreenCreditError::TermExceedsPolicy {
            months,
            max_months: policy.max_term_months,
        });
    }

    Ok(offer.with_term(months))
}

/// Correct each offer independently under the default policy, keeping input
/// order and dropping rejected ones.
pub fn correct_batch(offers: &[LoanTerms]) -> GreenCreditResult<Vec<LoanTerms>> {
    correct_batch_with_policy(offers, &OfferPolicy::default())
}

pub fn correct_batch_with_policy(
    offers: &[LoanTerms],
    policy: &OfferPolicy,
) -> GreenCreditResult<Vec<LoanTerms>> {
    let (accepted, _) = partition(offers, policy)?;
    Ok(accepted.into_iter().map(|(_, offer)| offer).collect())
}

/// Batch correction wrapped in the standard envelope, reporting what was
/// rejected and where each accepted offer sits against the advisory bands.
pub fn validate_offers(
    input: &OfferBatchInput,
) -> GreenCreditResult<ComputationOutput<OfferBatchOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (accepted, rejected) = partition(&input.offers, &input.policy)?;

    for (index, offer) in &accepted {
        warnings.extend(input.policy.advisories(&format!("offer {index}"), offer));
    }
    if accepted.is_empty() && !input.offers.is_empty() {
        warnings.push("No offer could be amortized within policy".into());
    }

    let output = OfferBatchOutput {
        accepted_count: accepted.len(),
        rejected_count: rejected.len(),
        accepted: accepted.into_iter().map(|(_, offer)| offer).collect(),
        rejected,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "max_term_months": input.policy.max_term_months,
        "advisory_rate_band_pct": [
            input.policy.advisory.min_rate_pct.to_string(),
            input.policy.advisory.max_rate_pct.to_string(),
        ],
        "advisory_min_term_months": input.policy.advisory.min_term_months,
        "authoritative_fields": ["principal", "annual_rate_pct", "fixed_monthly_payment", "reduced_monthly_cost"],
    });

    Ok(with_metadata(
        "Fixed-payment term correction (closed-form annuity inversion)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Corrected offers and rejections, both keyed by position in `offers`.
fn partition(
    offers: &[LoanTerms],
    policy: &OfferPolicy,
) -> GreenCreditResult<(Vec<(usize, LoanTerms)>, Vec<RejectedOffer>)> {
    let mut accepted = Vec::with_capacity(offers.len());
    let mut rejected = Vec::new();

    for (index, offer) in offers.iter().enumerate() {
        match correct_with_policy(offer, policy) {
            Ok(corrected) => accepted.push((index, corrected)),
            Err(e) => match e.rejection() {
                Some(rejection) => {
                    debug!(
                        index,
                        reason = %rejection.reason,
                        field = %rejection.offending_field,
                        "offer rejected"
                    );
                    rejected.push(RejectedOffer {
                        index,
                        rejection,
                        detail: e.to_string(),
                    });
                }
                None => return Err(e),
            },
        }
    }

    info!(
        accepted = accepted.len(),
        dropped = rejected.len(),
        "offer batch corrected"
    );
    Ok((accepted, rejected))
}

fn validate_terms(offer: &LoanTerms) -> GreenCreditResult<()> {
    if offer.principal <= Decimal::ZERO {
        return Err(GreenCreditError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    if offer.fixed_monthly_payment <= Decimal::ZERO {
        return Err(GreenCreditError::InvalidInput {
            field: "fixed_monthly_payment".into(),
            reason: "Fixed monthly payment must be positive".into(),
        });
    }
    if offer.annual_rate_pct < Decimal::ZERO {
        return Err(GreenCreditError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    Ok(())
}
