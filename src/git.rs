//! Git operations for commit message generation
//!
//! This module shells out to the local `git` executable to read the
//! repository state the prompt needs:
//! - Staged diff (truncated to the configured maximum length)
//! - Staged file list
//! - Current branch name

use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Repository state gathered for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Staged diff text, possibly truncated, empty when nothing is staged
    pub diff: String,
    /// Paths of staged files
    pub files: Vec<String>,
    /// Current branch name, `"unknown"` when detached or unreadable
    pub branch: String,
}

/// Gather diff, file list, and branch in one call
///
/// # Arguments
///
/// * `repo` - Path to the git working tree
/// * `max_diff_length` - Truncate the diff beyond this many characters
///
/// # Errors
///
/// * Git executable not found
/// * `repo` is not a git working tree
pub fn repo_info(repo: &Path, max_diff_length: usize) -> Result<RepoInfo, GitError> {
    Ok(RepoInfo {
        diff: staged_diff(repo, max_diff_length)?,
        files: staged_files(repo)?,
        branch: current_branch(repo),
    })
}

/// Get the staged diff via `git diff --cached --no-color`
///
/// Returns empty text (not an error) when nothing is staged. Diffs longer
/// than `max_length` characters are truncated with a trailing note so the
/// prompt stays within a reasonable size.
pub fn staged_diff(repo: &Path, max_length: usize) -> Result<String, GitError> {
    let diff = run_git(repo, &["diff", "--cached", "--no-color"])?;
    Ok(truncate_diff(diff, max_length))
}

/// List staged files via `git diff --cached --name-only`
pub fn staged_files(repo: &Path) -> Result<Vec<String>, GitError> {
    let output = run_git(repo, &["diff", "--cached", "--name-only"])?;
    Ok(output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Whether anything is staged for commit
pub fn has_staged_changes(repo: &Path) -> Result<bool, GitError> {
    Ok(!staged_files(repo)?.is_empty())
}

/// Current branch name, `"unknown"` if it cannot be determined
///
/// Branch name is advisory context for the prompt, so failures here are
/// not surfaced as errors.
pub fn current_branch(repo: &Path) -> String {
    run_git(repo, &["rev-parse", "--abbrev-ref", "HEAD"])
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a git command in `repo` and capture trimmed stdout
fn run_git(repo: &Path, args: &[&str]) -> Result<String, GitError> {
    debug!(?args, repo = %repo.display(), "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                GitError::NotFound
            } else {
                GitError::Spawn(e)
            }
        })?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.contains("not a git repository") {
        return Err(GitError::NotARepository(repo.display().to_string()));
    }
    Err(GitError::CommandFailed {
        command: args.join(" "),
        stderr: first_error_line(&stderr),
    })
}

/// Reduce git's stderr to its first `error:`/`fatal:` line
///
/// Git failures often dump usage text; one line is enough for the user.
fn first_error_line(stderr: &str) -> String {
    for line in stderr.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("fatal:").or_else(|| line.strip_prefix("error:")) {
            return rest.trim().to_string();
        }
    }
    stderr
        .lines()
        .next()
        .unwrap_or("git command failed")
        .trim()
        .to_string()
}

/// Truncate a diff to `max_length` characters, appending a note
fn truncate_diff(diff: String, max_length: usize) -> String {
    if diff.chars().count() <= max_length {
        return diff;
    }
    let total = diff.chars().count();
    let truncated: String = diff.chars().take(max_length).collect();
    format!("{truncated}\n\n... (diff truncated, {total} characters total)")
}
