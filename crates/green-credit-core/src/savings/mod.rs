pub mod aggregate;
pub mod factors;
pub mod projection;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

pub use aggregate::{aggregate, CreditRecord, CreditStatus, SavingsSummary};
use projection::{breakdown_by_category, project_credits, CategorySavings, CreditProjection};

use crate::{GreenCreditResult, types::*};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsInput {
    #[serde(alias = "creditos")]
    pub credits: Vec<CreditRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsOutput {
    pub summary: SavingsSummary,
    pub by_category: Vec<CategorySavings>,
    pub projections: Vec<CreditProjection>,
    pub counted_credits: usize,
    pub ignored_credits: usize,
}

/// Monthly savings across accepted credits with per-category and per-credit
/// detail.
pub fn calculate_savings(input: &SavingsInput) -> GreenCreditResult<ComputationOutput<SavingsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let counted = input.credits.iter().filter(|c| c.is_accepted()).count();
    let ignored = input.credits.len() - counted;
    if ignored > 0 {
        warnings.push(format!("{ignored} non-accepted credit(s) ignored"));
    }

    for (i, credit) in input.credits.iter().enumerate() {
        if credit.is_accepted() && credit.monthly_saving() < Decimal::ZERO {
            warnings.push(format!(
                "Credit {} ({}) increases monthly cost by {}",
                i + 1,
                credit.category,
                -credit.monthly_saving(),
            ));
        }
    }

    let summary = aggregate(&input.credits);
    debug!(
        counted,
        ignored,
        money = %summary.money,
        co2_kg = %summary.co2_kg,
        water_liters = %summary.water_liters,
        "savings aggregated"
    );

    let output = SavingsOutput {
        summary,
        by_category: breakdown_by_category(&input.credits),
        projections: project_credits(&input.credits),
        counted_credits: counted,
        ignored_credits: ignored,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "co2_kg_per_unit": {
            "electricity": factors::ELECTRICITY_CO2_KG.to_string(),
            "transport": factors::TRANSPORT_CO2_KG.to_string(),
        },
        "water_liters_per_unit": {
            "below_100": factors::WATER_LITERS_LOW_TIER.to_string(),
            "100_to_800": factors::WATER_LITERS_MID_TIER.to_string(),
            "above_800": factors::WATER_LITERS_HIGH_TIER.to_string(),
        },
        "money_categories": ["electricity", "transport", "water"],
        "rounding": "2dp, half away from zero",
    });

    Ok(with_metadata(
        "Category-factor savings aggregation",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_saving_warns_and_subtracts() {
        let input = SavingsInput {
            credits: vec![
                CreditRecord {
                    category: CreditCategory::Electricity,
                    status: CreditStatus::Accepted,
                    pre_adoption_monthly_cost: dec!(1000),
                    reduced_monthly_cost: dec!(400),
                },
                CreditRecord {
                    category: CreditCategory::Transport,
                    status: CreditStatus::Accepted,
                    pre_adoption_monthly_cost: dec!(1000),
                    reduced_monthly_cost: dec!(1200),
                },
            ],
        };
        let out = calculate_savings(&input).unwrap();
        assert_eq!(out.result.summary.money, dec!(400));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("increases monthly cost by 200"));
    }

    #[test]
    fn test_ignored_credits_counted() {
        let input = SavingsInput {
            credits: vec![CreditRecord {
                category: CreditCategory::Water,
                status: CreditStatus::Denied,
                pre_adoption_monthly_cost: dec!(300),
                reduced_monthly_cost: dec!(100),
            }],
        };
        let out = calculate_savings(&input).unwrap();
        assert_eq!(out.result.counted_credits, 0);
        assert_eq!(out.result.ignored_credits, 1);
        assert_eq!(out.result.summary, SavingsSummary::default());
        assert!(out.result.projections.is_empty());
    }
}
