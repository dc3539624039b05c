pub mod loan;
pub mod offers;
pub mod savings;
