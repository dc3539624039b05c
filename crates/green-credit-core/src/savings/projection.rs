use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::savings::aggregate::{CreditRecord, SavingsSummary, Totals};
use crate::types::{CreditCategory, Money};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PROJECTION_YEARS: Decimal = dec!(10);

/// Straight-line saving projection for one accepted credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditProjection {
    /// Position of the credit in the input list.
    pub index: usize,
    pub category: CreditCategory,
    pub monthly_saving: Money,
    pub annual_saving: Money,
    pub ten_year_saving: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySavings {
    pub category: CreditCategory,
    pub credits: usize,
    #[serde(flatten)]
    pub savings: SavingsSummary,
}

/// Projections for accepted credits that report a pre-adoption cost. Credits
/// without one carry no baseline to project from.
pub fn project_credits(credits: &[CreditRecord]) -> Vec<CreditProjection> {
    credits
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_accepted() && c.pre_adoption_monthly_cost > Decimal::ZERO)
        .map(|(index, c)| {
            let monthly = c.monthly_saving();
            let annual = monthly * MONTHS_PER_YEAR;
            CreditProjection {
                index,
                category: c.category,
                monthly_saving: monthly,
                annual_saving: annual,
                ten_year_saving: annual * PROJECTION_YEARS,
            }
        })
        .collect()
}

/// Summary totals split by category, skipping categories with no accepted
/// credit.
pub fn breakdown_by_category(credits: &[CreditRecord]) -> Vec<CategorySavings> {
    [
        CreditCategory::Electricity,
        CreditCategory::Water,
        CreditCategory::Transport,
        CreditCategory::Other,
    ]
    .into_iter()
    .filter_map(|category| {
        let mut totals = Totals::default();
        credits
            .iter()
            .filter(|c| c.is_accepted() && c.category == category)
            .for_each(|c| totals.add(c));
        (totals.count > 0).then(|| CategorySavings {
            category,
            credits: totals.count,
            savings: totals.rounded(),
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::savings::aggregate::CreditStatus;

    fn record(category: CreditCategory, before: Decimal, after: Decimal) -> CreditRecord {
        CreditRecord {
            category,
            status: CreditStatus::Accepted,
            pre_adoption_monthly_cost: before,
            reduced_monthly_cost: after,
        }
    }

    #[test]
    fn test_projection_multiples() {
        let p = project_credits(&[record(CreditCategory::Electricity, dec!(2000), dec!(800))]);
        assert_eq!(p.len(), 1);
        assert_eq!(p[0].monthly_saving, dec!(1200));
        assert_eq!(p[0].annual_saving, dec!(14400));
        assert_eq!(p[0].ten_year_saving, dec!(144000));
    }

    #[test]
    fn test_projection_skips_missing_baseline() {
        let credits = [
            record(CreditCategory::Water, dec!(0), dec!(0)),
            record(CreditCategory::Transport, dec!(5000), dec!(1500)),
        ];
        let p = project_credits(&credits);
        assert_eq!(p.len(), 1);
        assert_eq!(p[0].index, 1);
    }

    #[test]
    fn test_breakdown_only_present_categories() {
        let credits = [
            record(CreditCategory::Electricity, dec!(2000), dec!(1000)),
            record(CreditCategory::Electricity, dec!(1500), dec!(1000)),
            record(CreditCategory::Water, dec!(90), dec!(60)),
        ];
        let b = breakdown_by_category(&credits);
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].category, CreditCategory::Electricity);
        assert_eq!(b[0].credits, 2);
        assert_eq!(b[0].savings.co2_kg, dec!(328.5));
        assert_eq!(b[1].savings.water_liters, dec!(4650));
    }
}
