//! # stackgen codegen
//!
//! Generates the artifacts of a scaffolded CDK app from a resolved
//! project identity and options.
//!
//! Produces the stack stub, the app entry point, the CI/CD workflow,
//! lint and test-runner configuration, and the package manifest.

pub mod compose;
pub mod entrypoint;
pub mod package;
pub mod stack_file;
pub mod tooling;
pub mod workflows;
pub mod writer;

pub use compose::{compose, ComposedProject};
pub use entrypoint::{entrypoint, generate_entrypoint};
pub use stack_file::{generate_stack_file, stack_file};
pub use workflows::{build_workflow, render_workflow, workflow_file};
pub use writer::{GeneratedFile, OverwritePolicy};
