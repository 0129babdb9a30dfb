//! # Atrium Core
//!
//! Core types and error definitions for Atrium.
//! This crate provides the foundational abstractions used across all
//! layers of the workspace: the unified error taxonomy, result aliases,
//! pagination, request validation helpers, and the business-rule runner.

pub mod error;
pub mod pagination;
pub mod result;
pub mod rules;
pub mod validation;

pub use error::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;
