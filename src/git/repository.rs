use crate::domain::Version;
use crate::error::{Result, SemtagError};
use crate::git::{LatestTag, PushAuth, DISABLE_CONFIG_KEY};
use git2::{ErrorClass, ErrorCode, Oid, Repository as Git2Repo, Signature};
use std::path::Path;
use tracing::{debug, warn};

const TAGGER_NAME: &str = "semtag";
const TAGGER_EMAIL: &str = "semtag@localhost";
const TAG_MESSAGE: &str = "created by semtag";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    remote: String,
    auth: PushAuth,
}

impl Git2Repository {
    /// Open or discover a git repository, pushing to `origin` by default
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo,
            remote: "origin".to_string(),
            auth: PushAuth::default(),
        }
    }

    /// Set the remote tags are pushed to
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Set how credentials are answered during push
    pub fn with_auth(mut self, auth: PushAuth) -> Self {
        self.auth = auth;
        self
    }

    fn tagger(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(sig) => Ok(sig.to_owned()),
            Err(_) => Ok(Signature::now(TAGGER_NAME, TAGGER_EMAIL)?),
        }
    }

    fn tag_head(&self, name: &str, delete_first: bool) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|e| SemtagError::tag(format!("Cannot resolve HEAD: {}", e)))?;

        if delete_first {
            match self.repo.tag_delete(name) {
                Ok(()) => debug!(tag = name, "deleted existing tag"),
                Err(e) if e.code() == ErrorCode::NotFound => {}
                Err(e) => {
                    return Err(SemtagError::tag(format!(
                        "Cannot delete tag '{}': {}",
                        name, e
                    )))
                }
            }
        }

        let tagger = self.tagger()?;
        self.repo
            .tag(name, head.as_object(), &tagger, TAG_MESSAGE, false)
            .map_err(|e| SemtagError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_all_tags(&self, force: bool) -> Result<()> {
        let mut remote = self.repo.find_remote(&self.remote).map_err(|e| {
            SemtagError::remote(format!("Cannot find remote '{}': {}", self.remote, e))
        })?;

        let tags = self.repo.tag_names(None)?;
        let marker = if force { "+" } else { "" };
        let refspecs: Vec<String> = tags
            .iter()
            .flatten()
            .map(|tag| format!("{}refs/tags/{}:refs/tags/{}", marker, tag, tag))
            .collect();

        if refspecs.is_empty() {
            debug!(remote = %self.remote, "no tags to push");
            return Ok(());
        }

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|url, username_from_url, _allowed_types| {
            self.auth.credentials(url, username_from_url)
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                warn!(reference = refname, status, "remote rejected reference");
                Err(git2::Error::from_str(&format!(
                    "Push rejected for {}: {}",
                    refname, status
                )))
            }
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        debug!(remote = %self.remote, force, tags = refspecs.len(), "pushing tags");
        remote
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| SemtagError::remote(format!("Push failed: {}", e)))?;

        Ok(())
    }
}

impl super::Repository for Git2Repository {
    fn latest_tag(&self) -> Result<Option<LatestTag>> {
        let mut latest: Option<LatestTag> = None;

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let version = match Version::parse(name) {
                Ok(version) => version,
                Err(e) => {
                    debug!(tag = name, error = %e, "ignoring non-semver tag");
                    continue;
                }
            };

            let oid = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|r| r.peel_to_commit())
                .map_err(|e| SemtagError::tag(format!("Cannot peel tag '{}': {}", name, e)))?
                .id();

            if latest.as_ref().map_or(true, |l| version > l.version) {
                latest = Some(LatestTag {
                    name: name.to_string(),
                    oid,
                    version,
                });
            }
        }

        if latest.is_none() {
            debug!("found zero semver tags");
        }
        Ok(latest)
    }

    fn commits_since(&self, from: Option<Oid>) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(from) = from {
            revwalk.hide(from)?;
        }

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            messages.push(commit.message().unwrap_or_default().to_string());
        }

        // Oldest first
        messages.reverse();
        Ok(messages)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.tag_head(name, false)
    }

    fn recreate_tag(&self, name: &str) -> Result<()> {
        self.tag_head(name, true)
    }

    fn push_tags(&self) -> Result<()> {
        self.push_all_tags(false)
    }

    fn force_push_tags(&self) -> Result<()> {
        self.push_all_tags(true)
    }

    fn hash_for_branch(&self, branch: &str) -> Result<Oid> {
        let commit = self
            .repo
            .revparse_single(branch)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| SemtagError::branch(format!("Cannot resolve '{}': {}", branch, e)))?;

        Ok(commit.id())
    }

    fn is_disabled(&self) -> Result<bool> {
        let config = self.repo.config()?;
        match config.get_bool(DISABLE_CONFIG_KEY) {
            Ok(disabled) => Ok(disabled),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) if e.class() == ErrorClass::Config => {
                debug!(key = DISABLE_CONFIG_KEY, error = %e, "treating non-boolean value as not disabled");
                Ok(false)
            }
            Err(e) => Err(SemtagError::config(format!(
                "Cannot read '{}' from git config: {}",
                DISABLE_CONFIG_KEY, e
            ))),
        }
    }
}
