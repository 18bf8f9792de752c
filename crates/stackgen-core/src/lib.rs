//! Stackgen Core Library
//!
//! Domain models for the stackgen scaffolding generator: project identity
//! resolution, option merging, and the CI/CD job-graph model.

pub mod error;
pub mod identity;
pub mod options;
pub mod workflow;

pub use error::{StackgenError, StackgenResult};
