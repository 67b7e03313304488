//! Static analysis for Mano basic computer assembly.
//!
//! A run normalizes the source, resolves labels (pass 1), lays the program
//! out in a 4096 word memory image (pass 2), then runs the spelling, syntax
//! and logic checks over both.

pub mod analyze;
pub mod check;
pub mod complete;
pub mod config;
pub mod diag;
pub mod error;
pub mod memory;
pub mod report;
pub mod source;
pub mod symbols;

pub use analyze::{analyze, Analysis};
pub use complete::{complete, CompletionItem, CompletionKind};
pub use config::Settings;
pub use diag::{Diagnostic, Position, Range, Severity};
pub use error::Error;
