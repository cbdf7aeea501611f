//! User facing console output.
//!
//! Diagnostics go through `tracing`; this module is for the lines a user
//! running the tool is meant to read.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_commit_analysis, display_error, display_proposed_tag,
    display_status, display_success,
};
