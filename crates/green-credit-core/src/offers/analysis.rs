use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{monthly_payment, monthly_rate};
use crate::{GreenCreditError, GreenCreditResult, types::*};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub term_months: Months,
    pub monthly_rate: Decimal,
    /// Level installment the annuity formula requires for this term.
    pub scheduled_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub interest_pct_of_principal: Decimal,
    /// Fixed payment minus the scheduled one. Negative means the quoted
    /// payment cannot retire the loan in `term_months`.
    pub payment_headroom: Money,
    /// Pre-adoption payment minus the reduced utility cost.
    pub monthly_utility_saving: Money,
}

/// Totals for a loan held at its stated term. No per-period breakdown.
pub fn analyze_loan(terms: &LoanTerms) -> GreenCreditResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if terms.principal <= Decimal::ZERO {
        return Err(GreenCreditError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    if terms.annual_rate_pct < Decimal::ZERO {
        return Err(GreenCreditError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if terms.term_months == 0 {
        return Err(GreenCreditError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }

    let scheduled = monthly_payment(terms.principal, terms.annual_rate_pct, terms.term_months);
    let total_paid = scheduled
        .checked_mul(Decimal::from(terms.term_months))
        .ok_or_else(|| out_of_range("principal"))?;
    let total_interest = total_paid - terms.principal;
    let headroom = terms
        .fixed_monthly_payment
        .checked_sub(scheduled)
        .ok_or_else(|| out_of_range("fixed_monthly_payment"))?;
    let interest_pct = total_interest
        .checked_div(terms.principal)
        .and_then(|share| share.checked_mul(dec!(100)))
        .ok_or_else(|| out_of_range("principal"))?;
    let utility_saving = terms
        .fixed_monthly_payment
        .checked_sub(terms.reduced_monthly_cost)
        .ok_or_else(|| out_of_range("reduced_monthly_cost"))?;

    if headroom < Decimal::ZERO {
        warnings.push(format!(
            "Fixed payment {} is below the {} required over {} months",
            terms.fixed_monthly_payment.round_dp(2),
            scheduled.round_dp(2),
            terms.term_months,
        ));
    }

    let output = LoanAnalysis {
        term_months: terms.term_months,
        monthly_rate: monthly_rate(terms.annual_rate_pct),
        scheduled_payment: scheduled.round_dp(2),
        total_paid: total_paid.round_dp(2),
        total_interest: total_interest.round_dp(2),
        interest_pct_of_principal: interest_pct.round_dp(2),
        payment_headroom: headroom.round_dp(2),
        monthly_utility_saving: utility_saving,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "annual_rate_pct": terms.annual_rate_pct.to_string(),
        "compounding": "monthly",
        "final_installment": "level (no partial last payment)",
    });

    Ok(with_metadata(
        "Level-payment annuity totals",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn out_of_range(field: &str) -> GreenCreditError {
    GreenCreditError::InvalidInput {
        field: field.into(),
        reason: "Loan totals exceed the decimal range".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(term: Months, payment: Decimal) -> LoanTerms {
        LoanTerms {
            principal: dec!(120000),
            annual_rate_pct: dec!(6.0),
            term_months: term,
            fixed_monthly_payment: payment,
            reduced_monthly_cost: dec!(800),
            category: CreditCategory::Electricity,
            description: None,
        }
    }

    #[test]
    fn test_totals_for_three_year_loan() {
        let out = analyze_loan(&terms(36, dec!(4000))).unwrap();
        let a = &out.result;
        assert_eq!(a.scheduled_payment, dec!(3650.63));
        // 3650.6325 * 36 = 131422.77
        assert!((a.total_paid - dec!(131422.77)).abs() <= dec!(0.01));
        assert!((a.total_interest - dec!(11422.77)).abs() <= dec!(0.01));
        assert_eq!(a.payment_headroom, dec!(349.37));
        assert_eq!(a.monthly_utility_saving, dec!(3200));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_short_payment_warns() {
        let out = analyze_loan(&terms(36, dec!(2000))).unwrap();
        assert!(out.result.payment_headroom < Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_rate_has_no_interest() {
        let mut t = terms(24, dec!(5000));
        t.annual_rate_pct = Decimal::ZERO;
        let out = analyze_loan(&t).unwrap();
        assert_eq!(out.result.scheduled_payment, dec!(5000));
        assert_eq!(out.result.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_rejected() {
        assert!(analyze_loan(&terms(0, dec!(2000))).is_err());
    }

    #[test]
    fn test_out_of_range_totals_are_an_error() {
        let mut t = terms(12, dec!(2000));
        t.principal = dec!(70000000000000000000000000000);
        t.annual_rate_pct = dec!(1000000);
        let err = analyze_loan(&t).unwrap_err();
        assert!(matches!(err, GreenCreditError::InvalidInput { .. }));
    }
}
