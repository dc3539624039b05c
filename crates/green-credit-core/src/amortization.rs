use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Months, RatePct};

/// Monthly periodic rate from an annual percentage: `(pct / 100) / 12`.
pub fn monthly_rate(annual_rate_pct: RatePct) -> Decimal {
    annual_rate_pct / dec!(100) / dec!(12)
}

/// Fixed installment that retires `principal` in `months` equal payments.
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, straight-line `P / n` at a zero rate and
/// zero for a zero term. Negative inputs are the caller's problem. An
/// installment beyond the decimal range saturates to `Decimal::MAX`.
pub fn monthly_payment(principal: Money, annual_rate_pct: RatePct, months: Months) -> Money {
    checked_payment(principal, annual_rate_pct, months).unwrap_or(Decimal::MAX)
}

/// Interest accrued in the first month; a payment must exceed this to ever
/// amortize the loan. Saturates to `Decimal::MAX`.
pub fn interest_only_payment(principal: Money, annual_rate_pct: RatePct) -> Money {
    principal
        .checked_mul(monthly_rate(annual_rate_pct))
        .unwrap_or(Decimal::MAX)
}

/// Whole months needed to retire `principal` paying `payment` every month, or
/// `None` when the payment never amortizes the loan.
///
/// Closed-form inversion of the annuity formula,
/// `n = -ln(1 - P*r/M) / ln(1+r)`, rounded up and then settled against
/// [`monthly_payment`] so the result is the smallest affordable term. Terms
/// too long to represent saturate to `Months::MAX`.
pub fn months_from_payment(
    principal: Money,
    annual_rate_pct: RatePct,
    payment: Money,
) -> Option<Months> {
    if payment <= Decimal::ZERO {
        return None;
    }

    let r = monthly_rate(annual_rate_pct);
    let estimate = if r.is_zero() {
        match principal.checked_div(payment) {
            Some(n) => n.ceil(),
            None => return Some(Months::MAX),
        }
    } else {
        // Interest alone outgrows the decimal range, so no payment keeps up.
        let interest = principal.checked_mul(r)?;
        if payment <= interest {
            return None;
        }

        let remaining = Decimal::ONE - interest / payment;
        let numerator = remaining.checked_ln()?;
        let denominator = (Decimal::ONE + r).checked_ln()?;
        if denominator.is_zero() {
            return Some(Months::MAX);
        }
        match (-numerator).checked_div(denominator) {
            Some(n) => n.ceil(),
            None => return Some(Months::MAX),
        }
    };

    let n = to_months(estimate);
    if n == 0 || n == Months::MAX {
        return Some(n);
    }
    Some(settle_term(principal, annual_rate_pct, payment, n))
}

/// One-step correction of the logarithmic estimate against the forward
/// formula, absorbing rounding noise in either direction.
fn settle_term(principal: Money, annual_rate_pct: RatePct, payment: Money, n: Months) -> Months {
    let affordable =
        |m: Months| checked_payment(principal, annual_rate_pct, m).is_some_and(|p| p <= payment);

    if n > 1 && affordable(n - 1) {
        n - 1
    } else if !affordable(n) {
        n.saturating_add(1)
    } else {
        n
    }
}

fn checked_payment(principal: Money, annual_rate_pct: RatePct, months: Months) -> Option<Money> {
    if months == 0 {
        return Some(Decimal::ZERO);
    }

    let r = monthly_rate(annual_rate_pct);
    if r.is_zero() {
        return principal.checked_div(Decimal::from(months));
    }

    let interest = principal.checked_mul(r)?;
    // (1+r)^n overflows for very long terms; the payment converges to the
    // interest-only amount there.
    let factor = match (Decimal::ONE + r).checked_powi(i64::from(months)) {
        Some(f) => f,
        None => return Some(interest),
    };
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return principal.checked_div(Decimal::from(months));
    }

    interest.checked_mul(factor.checked_div(denominator)?)
}

/// Saturating conversion; absurdly long terms collapse to `u32::MAX` and are
/// caught by the term policy downstream.
fn to_months(n: Decimal) -> Months {
    if n <= Decimal::ZERO {
        return 0;
    }
    n.to_u32().unwrap_or(Months::MAX)
}
