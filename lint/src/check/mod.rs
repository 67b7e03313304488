//! Diagnostic passes. They run in the order spelling, syntax, logic and
//! share one [`Diagnostics`](crate::diag::Diagnostics) budget.

pub mod logic;
pub mod spelling;
pub mod syntax;
