//! Conversion factors from a monthly monetary saving to physical savings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{CreditCategory, Money};

/// kg of CO2 avoided per currency unit saved on electricity.
pub const ELECTRICITY_CO2_KG: Decimal = dec!(0.219);

/// kg of CO2 avoided per currency unit saved on fuel.
pub const TRANSPORT_CO2_KG: Decimal = dec!(0.0985);

/// Pre-adoption water bills below this are on the cheapest tariff.
pub const WATER_LOW_TIER_CEILING: Money = dec!(100);

/// Pre-adoption water bills above this are on the most expensive tariff.
pub const WATER_HIGH_TIER_FLOOR: Money = dec!(800);

pub const WATER_LITERS_LOW_TIER: Decimal = dec!(155);
pub const WATER_LITERS_MID_TIER: Decimal = dec!(13);
pub const WATER_LITERS_HIGH_TIER: Decimal = dec!(9);

pub fn co2_kg_per_unit(category: CreditCategory) -> Decimal {
    match category {
        CreditCategory::Electricity => ELECTRICITY_CO2_KG,
        CreditCategory::Transport => TRANSPORT_CO2_KG,
        CreditCategory::Water | CreditCategory::Other => Decimal::ZERO,
    }
}

/// Liters per currency unit saved, tiered on what the client paid for water
/// before adopting the product. Both tier edges belong to the middle tier.
pub fn water_liters_per_unit(pre_adoption_cost: Money) -> Decimal {
    if pre_adoption_cost < WATER_LOW_TIER_CEILING {
        WATER_LITERS_LOW_TIER
    } else if pre_adoption_cost <= WATER_HIGH_TIER_FLOOR {
        WATER_LITERS_MID_TIER
    } else {
        WATER_LITERS_HIGH_TIER
    }
}
