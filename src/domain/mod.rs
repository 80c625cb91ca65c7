//! Core domain models for reqbump
//!
//! This module contains the plain data types shared by every layer:
//! - Ecosystem identifiers for the supported grammars
//! - Update strategies
//! - Rewrite outcomes
//! - Requirement records exchanged with the manifest layer

mod ecosystem;
mod requirement_record;
mod rewrite_result;
mod strategy;

pub use ecosystem::Ecosystem;
pub use requirement_record::{Requirement, RequirementField};
pub use rewrite_result::RewriteResult;
pub use strategy::UpdateStrategy;
