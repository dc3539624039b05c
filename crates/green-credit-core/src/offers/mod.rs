pub mod analysis;
pub mod policy;
pub mod source;
pub mod validation;

pub use policy::{OfferPolicy, MAX_TERM_MONTHS};
pub use validation::{correct, correct_batch};
