use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{LoanTerms, Months, RatePct};

/// Hard ceiling on any corrected term.
pub const MAX_TERM_MONTHS: Months = 120;

/// Bands the proposal generator is asked to respect. Never enforced: an offer
/// outside them is still corrected, only flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryBands {
    pub min_rate_pct: RatePct,
    pub max_rate_pct: RatePct,
    pub min_term_months: Months,
}

impl Default for AdvisoryBands {
    fn default() -> Self {
        AdvisoryBands {
            min_rate_pct: dec!(3.5),
            max_rate_pct: dec!(8.5),
            min_term_months: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferPolicy {
    pub max_term_months: Months,
    pub advisory: AdvisoryBands,
}

impl Default for OfferPolicy {
    fn default() -> Self {
        OfferPolicy {
            max_term_months: MAX_TERM_MONTHS,
            advisory: AdvisoryBands::default(),
        }
    }
}

impl OfferPolicy {
    /// Human-readable notes for every advisory band a corrected offer falls
    /// outside of. `label` identifies the offer in the message.
    pub fn advisories(&self, label: &str, offer: &LoanTerms) -> Vec<String> {
        let mut notes = Vec::new();
        let bands = &self.advisory;

        if offer.annual_rate_pct < bands.min_rate_pct || offer.annual_rate_pct > bands.max_rate_pct {
            notes.push(format!(
                "{label}: annual rate {}% is outside the advisory {}%-{}% green band",
                offer.annual_rate_pct.normalize(),
                bands.min_rate_pct.normalize(),
                bands.max_rate_pct.normalize(),
            ));
        }
        if offer.term_months < bands.min_term_months {
            notes.push(format!(
                "{label}: term of {} months is below the advisory minimum of {} months",
                offer.term_months, bands.min_term_months,
            ));
        }
        if offer.reduced_monthly_cost < Decimal::ZERO {
            notes.push(format!("{label}: reduced monthly cost is negative"));
        }

        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CreditCategory;

    fn offer(rate: Decimal, term: Months) -> LoanTerms {
        LoanTerms {
            principal: dec!(50000),
            annual_rate_pct: rate,
            term_months: term,
            fixed_monthly_payment: dec!(2000),
            reduced_monthly_cost: dec!(300),
            category: CreditCategory::Electricity,
            description: None,
        }
    }

    #[test]
    fn test_default_policy() {
        let p = OfferPolicy::default();
        assert_eq!(p.max_term_months, 120);
        assert_eq!(p.advisory.min_term_months, 6);
        assert_eq!(p.advisory.min_rate_pct, dec!(3.5));
        assert_eq!(p.advisory.max_rate_pct, dec!(8.5));
    }

    #[test]
    fn test_no_advisories_inside_bands() {
        let p = OfferPolicy::default();
        assert!(p.advisories("offer 1", &offer(dec!(6), 24)).is_empty());
        assert!(p.advisories("offer 1", &offer(dec!(8.5), 6)).is_empty());
    }

    #[test]
    fn test_rate_and_term_advisories() {
        let p = OfferPolicy::default();
        let notes = p.advisories("offer 2", &offer(dec!(12), 3));
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("12%"));
        assert!(notes[1].contains("below the advisory minimum"));
    }

    #[test]
    fn test_partial_policy_from_json_keeps_defaults() {
        let p: OfferPolicy = serde_json::from_str(r#"{"max_term_months": 84}"#).unwrap();
        assert_eq!(p.max_term_months, 84);
        assert_eq!(p.advisory, AdvisoryBands::default());
    }
}
