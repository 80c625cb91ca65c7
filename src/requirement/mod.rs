//! Requirement strings: clauses, groups and satisfaction
//!
//! A requirement is parsed into OR-groups of AND-clauses:
//!
//! ```text
//! ">= 1.2, < 2 || ^3.1"  =>  [[>= 1.2, < 2], [^3.1]]
//! ```
//!
//! Each clause keeps its operator spelling, spacing and literal so the
//! rewriter can change one version without touching the rest of the text.

mod clause;
mod parser;
mod set;

pub use clause::{Operator, RequirementClause};
pub use parser::parse_requirement;
pub use set::{OrGroup, RequirementSet};

pub(crate) use clause::{bump_at, split_literal};
