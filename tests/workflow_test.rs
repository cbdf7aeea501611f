//! Workflows run end to end against real repositories.

mod common;

use common::TestRepo;
use semtag::ci::CiEnvironment;
use semtag::cli::{TagOutcome, Validation, Workflow, WorkflowOptions};
use semtag::domain::{TagFormat, VersionBump};
use semtag::git::{Git2Repository, DISABLE_CONFIG_KEY};
use semtag::SemtagError;

fn open(test: &TestRepo) -> Git2Repository {
    Git2Repository::open(test.path()).expect("Failed to open repository")
}

#[test]
fn test_first_release_is_initial_version() {
    let test = TestRepo::new();
    let head = test.commit("chore: initial commit");
    let remote = test.add_bare_remote("origin");

    let repo = open(&test);
    let outcome = Workflow::new(&repo, WorkflowOptions::default())
        .increment()
        .unwrap();

    assert_eq!(
        outcome,
        TagOutcome::Created {
            tag: "v0.0.1".to_string(),
            alias: None
        }
    );
    assert_eq!(remote.tag_target("v0.0.1"), Some(head));
}

#[test]
fn test_release_cycle_with_alias() {
    let test = TestRepo::new();
    let tagged = test.commit("feat: first feature");
    test.tag_annotated("v1.0.0", tagged);
    test.commit("fix: a bug");
    let head = test.commit("feat(api): a second feature");
    let remote = test.add_bare_remote("origin");

    let repo = open(&test);
    let options = WorkflowOptions {
        alias_tag: Some("latest".to_string()),
        ..Default::default()
    };
    let workflow = Workflow::new(&repo, options);

    let plan = workflow.next().unwrap();
    assert_eq!(plan.decision.bump, VersionBump::Minor);
    assert_eq!(plan.commits.len(), 2);
    assert_eq!(plan.new_tag.as_deref(), Some("v1.1.0"));
    assert_eq!(test.tag_target("v1.1.0"), None);

    let outcome = workflow.increment().unwrap();
    assert_eq!(
        outcome,
        TagOutcome::Created {
            tag: "v1.1.0".to_string(),
            alias: Some("latest".to_string())
        }
    );
    assert_eq!(remote.tag_target("v1.1.0"), Some(head));
    assert_eq!(remote.tag_target("latest"), Some(head));

    // Nothing new since the release
    let again = workflow.increment().unwrap();
    assert_eq!(
        again,
        TagOutcome::UpToDate {
            latest_tag: Some("v1.1.0".to_string())
        }
    );
}

#[test]
fn test_breaking_change_with_bare_tags() {
    let test = TestRepo::new();
    let tagged = test.commit("feat: first");
    test.tag_lightweight("1.4.2", tagged);
    test.commit("refactor!: drop the old API");
    let _remote = test.add_bare_remote("origin");

    let repo = open(&test);
    let options = WorkflowOptions {
        tag_format: TagFormat::Bare,
        ..Default::default()
    };
    let outcome = Workflow::new(&repo, options).increment().unwrap();

    assert_eq!(
        outcome,
        TagOutcome::Created {
            tag: "2.0.0".to_string(),
            alias: None
        }
    );
}

#[test]
fn test_short_and_prerelease_tags_continue_the_series() {
    let test = TestRepo::new();
    let short = test.commit("feat: first");
    test.tag_lightweight("v1.2", short);
    test.commit("fix: second");

    let repo = open(&test);
    let plan = Workflow::new(&repo, WorkflowOptions::default())
        .plan()
        .unwrap();
    assert_eq!(plan.latest_tag.as_deref(), Some("v1.2"));
    assert_eq!(plan.new_tag.as_deref(), Some("v1.2.1"));

    let rc = test.commit("feat: third");
    test.tag_annotated("v2.0.0-rc.1", rc);
    test.commit("fix: fourth");

    let plan = Workflow::new(&repo, WorkflowOptions::default())
        .plan()
        .unwrap();
    assert_eq!(plan.latest_tag.as_deref(), Some("v2.0.0-rc.1"));
    assert_eq!(plan.new_tag.as_deref(), Some("v2.0.0"));
}

#[test]
fn test_pull_request_against_base_branch() {
    let test = TestRepo::new();
    let base = test.commit("feat: base");
    test.branch("base", base);
    test.commit("fix: valid");
    test.commit("feat(ui): also valid");

    let repo = open(&test);
    let workflow = Workflow::new(&repo, WorkflowOptions::default());
    let result = workflow
        .validate_pull_request(Some("base"), &CiEnvironment::default())
        .unwrap();
    assert_eq!(result, Validation::Passed { checked: 2 });

    test.commit("did some stuff");
    let err = workflow
        .validate_pull_request(Some("base"), &CiEnvironment::default())
        .unwrap_err();
    match err {
        SemtagError::NonConforming(message) => assert_eq!(message, "did some stuff"),
        other => panic!("expected NonConforming, got {:?}", other),
    }
}

#[test]
fn test_validation_disabled_by_git_config() {
    let test = TestRepo::new();
    test.commit("feat: a");
    test.repo
        .config()
        .unwrap()
        .set_bool(DISABLE_CONFIG_KEY, true)
        .unwrap();

    let repo = open(&test);
    let result = Workflow::new(&repo, WorkflowOptions::default())
        .validate_commit_message("not conventional at all")
        .unwrap();
    assert!(matches!(result, Validation::Skipped(_)));
}
