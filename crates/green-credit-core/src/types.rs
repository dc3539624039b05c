use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates expressed as percentages (6.0 = 6%), the way offers quote them.
pub type RatePct = Decimal;

/// Installment counts
pub type Months = u32;

/// Utility category a credit finances. Drives savings-factor selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditCategory {
    #[serde(alias = "Luz", alias = "luz", alias = "Electricity")]
    Electricity,
    #[serde(alias = "Agua", alias = "agua", alias = "Water")]
    Water,
    #[serde(alias = "Transporte", alias = "transporte", alias = "Transport")]
    Transport,
    #[default]
    #[serde(other)]
    Other,
}

impl CreditCategory {
    /// Categories whose savings count toward money saved.
    pub fn counts_toward_money(&self) -> bool {
        !matches!(self, CreditCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditCategory::Electricity => "electricity",
            CreditCategory::Water => "water",
            CreditCategory::Transport => "transport",
            CreditCategory::Other => "other",
        }
    }
}

impl std::str::FromStr for CreditCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "electricity" | "luz" => CreditCategory::Electricity,
            "water" | "agua" => CreditCategory::Water,
            "transport" | "transporte" => CreditCategory::Transport,
            _ => CreditCategory::Other,
        })
    }
}

impl std::fmt::Display for CreditCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loan proposal. `term_months` is the only field validation derives; the
/// rest is authoritative and copied through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LoanTermsPayload")]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_pct: RatePct,
    /// Advisory on input; recomputed by validation.
    pub term_months: Months,
    pub fixed_monthly_payment: Money,
    pub reduced_monthly_cost: Money,
    pub category: CreditCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Accepted shapes of an incoming proposal. Generators may put the category
/// on the offer itself or on the nested `product`; the offer wins.
#[derive(Deserialize)]
struct LoanTermsPayload {
    #[serde(alias = "prestamo")]
    principal: Money,
    #[serde(alias = "interes")]
    annual_rate_pct: RatePct,
    #[serde(default, alias = "meses_originales")]
    term_months: Months,
    #[serde(alias = "gasto_inicial_mes")]
    fixed_monthly_payment: Money,
    #[serde(default, alias = "gasto_final_mes")]
    reduced_monthly_cost: Money,
    #[serde(default, alias = "categoria")]
    category: Option<CreditCategory>,
    #[serde(default, alias = "descripcion")]
    description: Option<String>,
    #[serde(default)]
    product: Option<ProductPayload>,
}

#[derive(Deserialize)]
struct ProductPayload {
    #[serde(default, alias = "categoria")]
    category: Option<CreditCategory>,
}

impl From<LoanTermsPayload> for LoanTerms {
    fn from(p: LoanTermsPayload) -> Self {
        let category = p
            .category
            .or_else(|| p.product.and_then(|product| product.category))
            .unwrap_or_default();
        LoanTerms {
            principal: p.principal,
            annual_rate_pct: p.annual_rate_pct,
            term_months: p.term_months,
            fixed_monthly_payment: p.fixed_monthly_payment,
            reduced_monthly_cost: p.reduced_monthly_cost,
            category,
            description: p.description,
        }
    }
}

impl LoanTerms {
    /// Copy of these terms with a different installment count.
    pub fn with_term(&self, term_months: Months) -> Self {
        LoanTerms {
            term_months,
            ..self.clone()
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_accepts_legacy_names() {
        let c: CreditCategory = serde_json::from_str("\"Luz\"").unwrap();
        assert_eq!(c, CreditCategory::Electricity);
        let c: CreditCategory = serde_json::from_str("\"Transporte\"").unwrap();
        assert_eq!(c, CreditCategory::Transport);
        let c: CreditCategory = serde_json::from_str("\"Gas\"").unwrap();
        assert_eq!(c, CreditCategory::Other);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("agua".parse::<CreditCategory>().unwrap(), CreditCategory::Water);
        assert_eq!("Electricity".parse::<CreditCategory>().unwrap(), CreditCategory::Electricity);
        assert_eq!("solar".parse::<CreditCategory>().unwrap(), CreditCategory::Other);
    }

    #[test]
    fn test_loan_terms_from_generator_payload() {
        let json = r#"{
            "prestamo": 60000,
            "interes": 6.0,
            "meses_originales": 24,
            "descripcion": "Sistema de paneles solares",
            "gasto_inicial_mes": 2000,
            "gasto_final_mes": 800,
            "categoria": "Luz"
        }"#;
        let terms: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.principal, dec!(60000));
        assert_eq!(terms.term_months, 24);
        assert_eq!(terms.fixed_monthly_payment, dec!(2000));
        assert_eq!(terms.reduced_monthly_cost, dec!(800));
        assert_eq!(terms.category, CreditCategory::Electricity);
    }

    #[test]
    fn test_loan_terms_category_from_nested_product() {
        let json = r#"{
            "prestamo": 400000,
            "interes": 7.5,
            "meses_originales": 60,
            "gasto_inicial_mes": 5000,
            "gasto_final_mes": 1500,
            "product": {"nombre": "Auto Electrico", "precio": 400000.0, "categoria": "Transporte"}
        }"#;
        let terms: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.category, CreditCategory::Transport);
    }

    #[test]
    fn test_loan_terms_own_category_beats_product() {
        let json = r#"{
            "principal": 1000, "annual_rate_pct": 6, "fixed_monthly_payment": 100,
            "category": "water", "product": {"categoria": "Luz"}
        }"#;
        let terms: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.category, CreditCategory::Water);
    }

    #[test]
    fn test_loan_terms_round_trip_through_json() {
        let terms = LoanTerms {
            principal: dec!(60000),
            annual_rate_pct: dec!(6.0),
            term_months: 33,
            fixed_monthly_payment: dec!(2000),
            reduced_monthly_cost: dec!(800),
            category: CreditCategory::Electricity,
            description: None,
        };
        let json = serde_json::to_string(&terms).unwrap();
        assert!(!json.contains("description"));
        let back: LoanTerms = serde_json::from_str(&json).unwrap();
        assert_eq!(back, terms);
    }

    #[test]
    fn test_with_term_keeps_other_fields() {
        let terms = LoanTerms {
            principal: dec!(1000),
            annual_rate_pct: dec!(6),
            term_months: 3,
            fixed_monthly_payment: dec!(500),
            reduced_monthly_cost: dec!(0),
            category: CreditCategory::Water,
            description: Some("tank".into()),
        };
        let changed = terms.with_term(2);
        assert_eq!(changed.term_months, 2);
        assert_eq!(changed.principal, terms.principal);
        assert_eq!(changed.description, terms.description);
    }
}
