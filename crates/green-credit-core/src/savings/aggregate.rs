use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::savings::factors::{co2_kg_per_unit, water_liters_per_unit};
use crate::types::{CreditCategory, Money};

/// Lifecycle state of a persisted credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    #[serde(alias = "PENDIENTE", alias = "PENDING")]
    Pending,
    #[serde(alias = "APROBADO", alias = "APPROVED")]
    Approved,
    #[serde(alias = "NEGADO", alias = "DENIED")]
    Denied,
    #[default]
    #[serde(alias = "ACEPTADO", alias = "ACCEPTED")]
    Accepted,
}

/// A credit as the persistence layer reports it, read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRecord {
    #[serde(default, alias = "categoria")]
    pub category: CreditCategory,
    #[serde(default, alias = "estado")]
    pub status: CreditStatus,
    /// What the client paid for the utility each month before the product.
    #[serde(alias = "fixed_monthly_payment", alias = "gasto_inicial_mes")]
    pub pre_adoption_monthly_cost: Money,
    #[serde(default, alias = "gasto_final_mes")]
    pub reduced_monthly_cost: Money,
}

impl CreditRecord {
    pub fn monthly_saving(&self) -> Money {
        self.pre_adoption_monthly_cost - self.reduced_monthly_cost
    }

    pub fn is_accepted(&self) -> bool {
        self.status == CreditStatus::Accepted
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub money: Money,
    pub co2_kg: Decimal,
    pub water_liters: Decimal,
}

/// Money, CO2 and water saved per month across every accepted credit.
/// Negative savings subtract; non-accepted records are skipped.
pub fn aggregate(credits: &[CreditRecord]) -> SavingsSummary {
    let mut totals = Totals::default();
    for record in credits.iter().filter(|c| c.is_accepted()) {
        totals.add(record);
    }
    totals.rounded()
}

/// Accumulates unrounded contributions; rounding happens once at the end.
#[derive(Debug, Default)]
pub(crate) struct Totals {
    pub(crate) count: usize,
    money: Decimal,
    co2_kg: Decimal,
    water_liters: Decimal,
}

impl Totals {
    pub(crate) fn add(&mut self, record: &CreditRecord) {
        let saving = record.monthly_saving();
        self.count += 1;

        if record.category.counts_toward_money() {
            self.money += saving;
        }
        self.co2_kg += saving * co2_kg_per_unit(record.category);
        if record.category == CreditCategory::Water {
            self.water_liters += saving * water_liters_per_unit(record.pre_adoption_monthly_cost);
        }
    }

    pub(crate) fn rounded(&self) -> SavingsSummary {
        SavingsSummary {
            money: round2(self.money),
            co2_kg: round2(self.co2_kg),
            water_liters: round2(self.water_liters),
        }
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(category: CreditCategory, before: Decimal, after: Decimal) -> CreditRecord {
        CreditRecord {
            category,
            status: CreditStatus::Accepted,
            pre_adoption_monthly_cost: before,
            reduced_monthly_cost: after,
        }
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(aggregate(&[]), SavingsSummary::default());
    }

    #[test]
    fn test_water_mid_tier() {
        let s = aggregate(&[record(CreditCategory::Water, dec!(500), dec!(350))]);
        assert_eq!(s.water_liters, dec!(1950));
        assert_eq!(s.money, dec!(150));
        assert!(s.co2_kg.is_zero());
    }

    #[test]
    fn test_electricity_co2() {
        let s = aggregate(&[record(CreditCategory::Electricity, dec!(2000), dec!(1000))]);
        assert_eq!(s.co2_kg, dec!(219));
        assert_eq!(s.money, dec!(1000));
        assert!(s.water_liters.is_zero());
    }

    #[test]
    fn test_other_category_counts_for_nothing() {
        let s = aggregate(&[record(CreditCategory::Other, dec!(900), dec!(100))]);
        assert_eq!(s, SavingsSummary::default());
    }

    #[test]
    fn test_non_accepted_records_skipped() {
        let mut pending = record(CreditCategory::Electricity, dec!(2000), dec!(1000));
        pending.status = CreditStatus::Pending;
        assert_eq!(aggregate(&[pending]), SavingsSummary::default());
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // banker's rounding would give 0.12
        let s = aggregate(&[record(CreditCategory::Transport, dec!(10.125), dec!(10))]);
        assert_eq!(s.money, dec!(0.13));
    }

    #[test]
    fn test_record_from_persistence_payload() {
        let json = r#"{"categoria": "Agua", "estado": "ACEPTADO", "gasto_inicial_mes": 80, "gasto_final_mes": 50}"#;
        let r: CreditRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.category, CreditCategory::Water);
        assert!(r.is_accepted());
        assert_eq!(r.monthly_saving(), dec!(30));
    }
}
