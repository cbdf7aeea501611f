//! Tagging and validation workflows
//!
//! Everything here runs against the [Repository] trait, so the same code
//! drives the real git repository and the in-memory mock. CLI parsing and
//! console output stay in `main.rs`.

use tracing::{debug, error, info};

use crate::analyzer::{VersionAnalyzer, VersionDecision};
use crate::boundary::BoundaryWarning;
use crate::ci::CiEnvironment;
use crate::config::Config;
use crate::domain::{classify, is_valid_commit_message, TagFormat, Version};
use crate::error::{Result, SemtagError};
use crate::git::{Repository, DISABLE_CONFIG_KEY};

/// Knobs of the tagging workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowOptions {
    /// Tag a patch release even when no commit requires one
    pub always_patch: bool,

    /// Alias tag moved to every new release (e.g. "latest")
    pub alias_tag: Option<String>,

    /// How new tags are written
    pub tag_format: TagFormat,
}

impl From<&Config> for WorkflowOptions {
    fn from(config: &Config) -> Self {
        WorkflowOptions {
            always_patch: config.always_patch,
            alias_tag: config.alias_tag().map(str::to_string),
            tag_format: config.tag_format(),
        }
    }
}

/// What the next release would be, computed without side effects
#[derive(Debug, Clone, PartialEq)]
pub struct TagPlan {
    /// Name of the latest semver tag
    pub latest_tag: Option<String>,

    /// Commit messages considered, oldest first
    pub commits: Vec<String>,

    pub decision: VersionDecision,

    /// Tag name to create, `None` when up to date
    pub new_tag: Option<String>,

    pub warnings: Vec<BoundaryWarning>,
}

/// Result of a successful increment
#[derive(Debug, Clone, PartialEq)]
pub enum TagOutcome {
    /// No commit since the latest tag requires a release
    UpToDate { latest_tag: Option<String> },

    /// A new tag was created and pushed
    Created { tag: String, alias: Option<String> },
}

/// Result of a successful validation
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Every message checked conforms
    Passed { checked: usize },

    /// Validation is disabled for this repository
    Skipped(BoundaryWarning),
}

/// The tagging and validation workflows over a repository
pub struct Workflow<'a, R: Repository + ?Sized> {
    repo: &'a R,
    options: WorkflowOptions,
}

impl<'a, R: Repository + ?Sized> Workflow<'a, R> {
    pub fn new(repo: &'a R, options: WorkflowOptions) -> Self {
        Workflow { repo, options }
    }

    /// Compute the next tag without touching the repository
    pub fn plan(&self) -> Result<TagPlan> {
        let analyzer = VersionAnalyzer::new(self.options.always_patch);
        let mut warnings = Vec::new();

        let Some(latest) = self.repo.latest_tag()? else {
            let decision = analyzer.decide(None, Default::default());
            let new_tag = self.format(decision.next.as_ref());
            if let Some(initial_tag) = &new_tag {
                warnings.push(BoundaryWarning::NoPriorTag {
                    initial_tag: initial_tag.clone(),
                });
            }
            return Ok(TagPlan {
                latest_tag: None,
                commits: Vec::new(),
                decision,
                new_tag,
                warnings,
            });
        };

        let commits = self.repo.commits_since(Some(latest.oid))?;
        debug!(tag = %latest.name, commits = commits.len(), "analyzing commits since latest tag");

        let bump = analyzer.analyze_messages(&commits)?;
        let decision = analyzer.decide(Some(&latest.version), bump);

        let unrecognized = commits
            .iter()
            .filter(|m| !is_valid_commit_message(m))
            .count();
        if unrecognized > 0 {
            warnings.push(BoundaryWarning::UnrecognizedCommits {
                count: unrecognized,
                latest_tag: latest.name.clone(),
            });
        }

        Ok(TagPlan {
            latest_tag: Some(latest.name),
            new_tag: self.format(decision.next.as_ref()),
            commits,
            decision,
            warnings,
        })
    }

    /// Report whether a new tag is required, without creating it
    pub fn next(&self) -> Result<TagPlan> {
        let plan = self.plan()?;
        match &plan.new_tag {
            Some(tag) => info!(tag = %tag, bump = %plan.decision.bump, "new tag required"),
            None => info!("up to date"),
        }
        Ok(plan)
    }

    /// Create and push the next tag, moving the alias tag if configured
    pub fn increment(&self) -> Result<TagOutcome> {
        let plan = self.plan()?;
        self.apply(plan)
    }

    /// Create and push the tag a plan calls for
    pub fn apply(&self, plan: TagPlan) -> Result<TagOutcome> {
        let Some(tag) = plan.new_tag else {
            info!("no new tag needed");
            return Ok(TagOutcome::UpToDate {
                latest_tag: plan.latest_tag,
            });
        };

        debug!(tag = %tag, "starting tag creation");
        self.repo.create_tag(&tag)?;
        self.repo.push_tags()?;
        info!(tag = %tag, "created tag");

        let alias = match &self.options.alias_tag {
            Some(alias) => {
                debug!(alias = %alias, "moving alias tag");
                self.repo.recreate_tag(alias)?;
                self.repo.force_push_tags()?;
                info!(alias = %alias, "moved alias tag");
                Some(alias.clone())
            }
            None => None,
        };

        Ok(TagOutcome::Created { tag, alias })
    }

    /// Check one commit message, as a commit-msg hook would
    pub fn validate_commit_message(&self, message: &str) -> Result<Validation> {
        if let Some(skipped) = self.skip_if_disabled()? {
            return Ok(skipped);
        }

        classify(message).map_err(not_recognized_to_non_conforming)?;
        Ok(Validation::Passed { checked: 1 })
    }

    /// Check every commit between the base branch and HEAD.
    ///
    /// The base branch is taken from `base`, or inferred from the CI
    /// environment when `base` is `None`.
    pub fn validate_pull_request(
        &self,
        base: Option<&str>,
        ci: &CiEnvironment,
    ) -> Result<Validation> {
        if let Some(skipped) = self.skip_if_disabled()? {
            return Ok(skipped);
        }

        let base = base.or_else(|| ci.base_branch()).ok_or_else(|| {
            SemtagError::config(
                "cannot infer the base branch: pass --base-branch or run under GitHub Actions or GitLab CI",
            )
        })?;

        let base_oid = self.repo.hash_for_branch(base)?;
        let commits = self.repo.commits_since(Some(base_oid))?;
        debug!(base, commits = commits.len(), "validating pull request commits");

        let mut first_failure = None;
        for message in &commits {
            if let Err(e) = classify(message) {
                let e = not_recognized_to_non_conforming(e);
                error!(message = %message.trim_end(), "commit does not conform to conventions");
                first_failure.get_or_insert(e);
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(Validation::Passed {
                checked: commits.len(),
            }),
        }
    }

    fn skip_if_disabled(&self) -> Result<Option<Validation>> {
        if self.repo.is_disabled()? {
            debug!("skipping validation, disabled for this repository");
            return Ok(Some(Validation::Skipped(BoundaryWarning::ValidationDisabled {
                config_key: DISABLE_CONFIG_KEY.to_string(),
            })));
        }
        Ok(None)
    }

    fn format(&self, version: Option<&Version>) -> Option<String> {
        version.map(|v| self.options.tag_format.format(v))
    }
}

fn not_recognized_to_non_conforming(e: SemtagError) -> SemtagError {
    match e {
        SemtagError::NotRecognized(message) => SemtagError::NonConforming(message),
        other => other,
    }
}
