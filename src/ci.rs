//! Detection of the CI system semtag runs under.

use crate::error::Result;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

const GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";
const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";
const GITHUB_BASE_REF: &str = "GITHUB_BASE_REF";
const GITLAB_TARGET_BRANCH: &str = "CI_MERGE_REQUEST_TARGET_BRANCH_NAME";

/// Snapshot of the CI-related environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnvironment {
    pub github_actions: bool,
    pub github_output: Option<PathBuf>,
    pub github_base_ref: Option<String>,
    pub gitlab_target_branch: Option<String>,
}

impl CiEnvironment {
    /// Read the current process environment
    pub fn from_env() -> Self {
        CiEnvironment {
            github_actions: env::var(GITHUB_ACTIONS).is_ok_and(|v| v == "true"),
            github_output: non_empty_var(GITHUB_OUTPUT).map(PathBuf::from),
            github_base_ref: non_empty_var(GITHUB_BASE_REF),
            gitlab_target_branch: non_empty_var(GITLAB_TARGET_BRANCH),
        }
    }

    /// Base branch of the pull/merge request being built, if any
    pub fn base_branch(&self) -> Option<&str> {
        self.github_base_ref
            .as_deref()
            .or(self.gitlab_target_branch.as_deref())
    }

    /// Publish the created tag as a step output.
    ///
    /// Returns whether anything was emitted.
    pub fn emit_tag(&self, tag: &str) -> Result<bool> {
        if !self.github_actions {
            return Ok(false);
        }

        match &self.github_output {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "tag={}", tag)?;
            }
            None => println!("::set-output name=tag::{}", tag),
        }
        Ok(true)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
