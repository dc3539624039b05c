use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GreenCreditError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Infeasible payment: {payment} does not exceed the interest-only payment {interest_only}")]
    InfeasiblePayment {
        payment: Decimal,
        interest_only: Decimal,
    },

    #[error("Term exceeds policy: {months} months is above the {max_months}-month maximum")]
    TermExceedsPolicy { months: u32, max_months: u32 },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for GreenCreditError {
    fn from(e: serde_json::Error) -> Self {
        GreenCreditError::SerializationError(e.to_string())
    }
}

/// Why an offer was turned away. Business outcome, not a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InfeasiblePayment,
    TermExceedsPolicy,
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::InfeasiblePayment => "payment insufficient to amortize loan",
            RejectionReason::TermExceedsPolicy => "term exceeds policy maximum",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Structured rejection handed back to the proposal source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: RejectionReason,
    pub offending_field: String,
}

impl GreenCreditError {
    /// The structured rejection for business outcomes; `None` for caller
    /// contract violations, which must propagate instead.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            GreenCreditError::InfeasiblePayment { .. } => Some(Rejection {
                reason: RejectionReason::InfeasiblePayment,
                offending_field: "fixed_monthly_payment".into(),
            }),
            GreenCreditError::TermExceedsPolicy { .. } => Some(Rejection {
                reason: RejectionReason::TermExceedsPolicy,
                offending_field: "term_months".into(),
            }),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        self.rejection().is_some()
    }
}
