//! reqbump - Format-preserving version requirement rewriter
//!
//! This library parses and rewrites dependency requirement strings for
//! several package ecosystems while keeping their original formatting:
//! - Rust (Cargo)
//! - JavaScript (npm)
//! - Elixir/Erlang (Hex)
//! - Java (Maven)
//! - Python (pip, uv, poetry)

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod grammar;
pub mod output;
pub mod requirement;
pub mod update;
pub mod version;
