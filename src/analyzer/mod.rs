//! Analysis engine for determining the next version from commits

pub mod version_analyzer;

pub use version_analyzer::{VersionAnalyzer, VersionDecision};
