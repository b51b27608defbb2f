//! Conversion ranking for the Rill expression AST.
//!
//! The type-checking driver asks this crate one question while resolving
//! overloads and coercions: can this expression be converted to that type,
//! and how much work does it take? The answer is a [`ConversionRank`], never
//! a diagnostic — turning `Invalid` into a user-facing error is the caller's
//! job.

mod rank;

pub use rank::{rank_of_conversion, ConversionRank};
