//! xapigen - Generator of typed XenAPI client bindings
//!
//! The binary (`xapigen`) is a thin layer over this library:
//! - [`codegen`] turns object types into rendered units
//! - [`plan`] collects the output tree and swaps it into place atomically
//! - [`generate`] drives a whole run from a [`Config`](xapigen_core::Config)

pub mod codegen;
pub mod generate;
pub mod plan;

pub use generate::{GenerationReport, run};
pub use plan::{BuildPlan, PlanEntry};
