//! Workflows behind the command line subcommands.

pub mod orchestration;

pub use orchestration::{TagOutcome, TagPlan, Validation, Workflow, WorkflowOptions};
