//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature};

/// A throwaway git repository in a temp directory
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create an empty repository with a local identity configured
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'static> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Commit a change to `file.txt` with the given message
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();

        std::fs::write(self.path().join("file.txt"), message).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new("file.txt")).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    pub fn tag_annotated(&self, name: &str, oid: Oid) {
        let sig = self.signature();
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag(name, &obj, &sig, name, false)
            .expect("Failed to create annotated tag");
    }

    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo
            .branch(name, &commit, false)
            .expect("Failed to create branch");
    }

    /// Commit the tag points to, peeled through annotated tags
    pub fn tag_target(&self, name: &str) -> Option<Oid> {
        peel_tag(&self.repo, name)
    }

    /// Attach a bare repository as remote `name`
    pub fn add_bare_remote(&self, name: &str) -> BareRemote {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init_bare(dir.path()).expect("Failed to init bare repo");
        let url = dir.path().to_str().expect("temp path is not UTF-8");
        self.repo.remote(name, url).expect("Failed to add remote");
        BareRemote { dir, repo }
    }
}

/// A bare repository standing in for a remote
pub struct BareRemote {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl BareRemote {
    pub fn tag_target(&self, name: &str) -> Option<Oid> {
        peel_tag(&self.repo, name)
    }
}

fn peel_tag(repo: &Repository, name: &str) -> Option<Oid> {
    repo.find_reference(&format!("refs/tags/{}", name))
        .ok()?
        .peel_to_commit()
        .ok()
        .map(|c| c.id())
}
