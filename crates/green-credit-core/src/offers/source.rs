use crate::offers::policy::OfferPolicy;
use crate::offers::validation::correct_batch_with_policy;
use crate::{GreenCreditResult, types::LoanTerms};

/// Anything that drafts loan proposals from a conversation or form context:
/// a generative model client, a form handler, a fixture file.
pub trait ProposalSource {
    fn generate(&self, context: &str) -> GreenCreditResult<Vec<LoanTerms>>;
}

/// Serves a fixed list of proposals regardless of context.
#[derive(Debug, Clone, Default)]
pub struct StaticProposals {
    proposals: Vec<LoanTerms>,
}

impl StaticProposals {
    pub fn new(proposals: Vec<LoanTerms>) -> Self {
        StaticProposals { proposals }
    }
}

impl ProposalSource for StaticProposals {
    fn generate(&self, _context: &str) -> GreenCreditResult<Vec<LoanTerms>> {
        Ok(self.proposals.clone())
    }
}

/// Draft proposals and keep only those that amortize within policy, with
/// corrected terms.
pub fn propose_and_correct<S: ProposalSource + ?Sized>(
    source: &S,
    context: &str,
    policy: &OfferPolicy,
) -> GreenCreditResult<Vec<LoanTerms>> {
    let drafts = source.generate(context)?;
    correct_batch_with_policy(&drafts, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CreditCategory;
    use crate::GreenCreditError;
    use rust_decimal_macros::dec;

    struct FailingSource;

    impl ProposalSource for FailingSource {
        fn generate(&self, _context: &str) -> GreenCreditResult<Vec<LoanTerms>> {
            Err(GreenCreditError::SerializationError("malformed model output".into()))
        }
    }

    #[test]
    fn test_static_source_is_corrected() {
        let source = StaticProposals::new(vec![LoanTerms {
            principal: dec!(10000),
            annual_rate_pct: dec!(0),
            term_months: 6,
            fixed_monthly_payment: dec!(500),
            reduced_monthly_cost: dec!(100),
            category: CreditCategory::Water,
            description: None,
        }]);
        let offers = propose_and_correct(&source, "ignored", &OfferPolicy::default()).unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].term_months, 20);
    }

    #[test]
    fn test_source_errors_propagate() {
        let source: Box<dyn ProposalSource> = Box::new(FailingSource);
        assert!(propose_and_correct(source.as_ref(), "ctx", &OfferPolicy::default()).is_err());
    }
}
