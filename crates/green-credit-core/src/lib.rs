pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "offers")]
pub mod offers;

#[cfg(feature = "savings")]
pub mod savings;

pub use error::{GreenCreditError, Rejection, RejectionReason};
pub use types::*;

/// Standard result type for all green-credit operations
pub type GreenCreditResult<T> = Result<T, GreenCreditError>;
