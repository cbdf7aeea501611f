//! Formatting of console output.
//!
//! `format_*` functions build the styled lines, `display_*` functions print
//! them. Status output goes to stdout, errors and warnings to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::VersionBump;

const MAX_LISTED_COMMITS: usize = 10;
const MAX_SUBJECT_WIDTH: usize = 60;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

/// Print a non-fatal warning.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}

/// First line of a commit message, cut to a readable width.
pub fn commit_subject(message: &str) -> &str {
    let subject = message.lines().next().unwrap_or_default();
    match subject.char_indices().nth(MAX_SUBJECT_WIDTH) {
        Some((end, _)) => &subject[..end],
        None => subject,
    }
}

/// List the analyzed commits and the bump they add up to.
///
/// At most ten subjects are shown, followed by a count of the rest.
pub fn display_commit_analysis(commit_messages: &[String], since: Option<&str>, bump: VersionBump) {
    match since {
        Some(tag) => println!(
            "\n{}",
            style(format!("Analyzing {} commits since '{}'", commit_messages.len(), tag)).bold()
        ),
        None => println!("\n{}", style("No previous tag, nothing to analyze").bold()),
    }

    for (i, message) in commit_messages.iter().take(MAX_LISTED_COMMITS).enumerate() {
        println!("  {}. {}", i + 1, commit_subject(message));
    }

    if commit_messages.len() > MAX_LISTED_COMMITS {
        println!(
            "  ... and {} more commits",
            commit_messages.len() - MAX_LISTED_COMMITS
        );
    }

    println!("  Bump: {}", style(bump).cyan());
}

/// Show the tag change, or the initial tag when there is no previous one.
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Tag Change:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => {
            println!("\n{}", style("Initial Tag:").bold());
            println!("  New tag: {}", style(new_tag).green());
        }
    }
}
