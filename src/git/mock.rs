use crate::domain::Version;
use crate::error::{Result, SemtagError};
use crate::git::{LatestTag, Repository};
use git2::Oid;
use std::collections::HashMap;
use std::sync::Mutex;

/// A side-effecting call recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateTag(String),
    RecreateTag(String),
    PushTags,
    ForcePushTags,
}

/// Mock repository for testing without actual git operations
#[derive(Default)]
pub struct MockRepository {
    latest: Option<LatestTag>,
    commits: HashMap<Option<Oid>, Vec<String>>,
    branch_heads: HashMap<String, Oid>,
    disabled: bool,
    fail_push: bool,
    calls: Mutex<Vec<MockCall>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latest semver tag
    pub fn with_latest_tag(mut self, name: &str, oid: Oid) -> Self {
        let version = Version::parse(name).unwrap_or_else(|_| Version::new(0, 0, 0));
        self.latest = Some(LatestTag {
            name: name.to_string(),
            oid,
            version,
        });
        self
    }

    /// Commits returned by `commits_since(from)`
    pub fn with_commits<S: Into<String>>(
        mut self,
        from: Option<Oid>,
        messages: impl IntoIterator<Item = S>,
    ) -> Self {
        self.commits
            .insert(from, messages.into_iter().map(Into::into).collect());
        self
    }

    /// Set a branch head
    pub fn with_branch(mut self, branch: impl Into<String>, oid: Oid) -> Self {
        self.branch_heads.insert(branch.into(), oid);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Make every push fail with a remote error
    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Side-effecting calls made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<MockCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: MockCall) {
        self.lock_calls().push(call);
    }
}

impl Repository for MockRepository {
    fn latest_tag(&self) -> Result<Option<LatestTag>> {
        Ok(self.latest.clone())
    }

    fn commits_since(&self, from: Option<Oid>) -> Result<Vec<String>> {
        self.commits.get(&from).cloned().ok_or_else(|| {
            SemtagError::branch(format!("No commits registered since {:?}", from))
        })
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(MockCall::CreateTag(name.to_string()));
        Ok(())
    }

    fn recreate_tag(&self, name: &str) -> Result<()> {
        self.record(MockCall::RecreateTag(name.to_string()));
        Ok(())
    }

    fn push_tags(&self) -> Result<()> {
        if self.fail_push {
            return Err(SemtagError::remote("push rejected"));
        }
        self.record(MockCall::PushTags);
        Ok(())
    }

    fn force_push_tags(&self) -> Result<()> {
        if self.fail_push {
            return Err(SemtagError::remote("push rejected"));
        }
        self.record(MockCall::ForcePushTags);
        Ok(())
    }

    fn hash_for_branch(&self, branch: &str) -> Result<Oid> {
        self.branch_heads
            .get(branch)
            .copied()
            .ok_or_else(|| SemtagError::branch(format!("Branch not found: {}", branch)))
    }

    fn is_disabled(&self) -> Result<bool> {
        Ok(self.disabled)
    }
}
