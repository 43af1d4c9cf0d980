use crate::error::{GredError, Result};
use crate::model::{ChangeStats, CommitRecord};
use std::path::{Path, PathBuf};
use std::process::Command;

/// The queries the scan needs from the version-control system. All three are
/// read-only; implementations must never mutate the repository.
pub trait Vcs {
    /// Commits reachable from HEAD with commit date >= `since`, newest first.
    fn commits_since(&self, since: &str) -> Result<Vec<CommitRecord>>;

    /// Total added/deleted line counts for one commit.
    fn change_stats(&self, hash: &str) -> Result<ChangeStats>;

    /// Author display name for one commit.
    fn author_name(&self, hash: &str) -> Result<String>;
}

/// `Vcs` backed by the `git` binary, one subprocess per query.
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`. The path is not
    /// validated here; a missing repository surfaces on the first query.
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("--no-pager")
            .args(args)
            .current_dir(&self.path)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GredError::Git(stderr.trim().to_string()));
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

impl Vcs for GitRepo {
    fn commits_since(&self, since: &str) -> Result<Vec<CommitRecord>> {
        let since_arg = format!("--since={since}");
        // %x09 keeps the delimiter out of the format string itself; a tab can
        // never appear inside a hash.
        let log = self.run_git(&["log", &since_arg, "--pretty=format:%H%x09%s"])?;

        Ok(log
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                let (hash, subject) = line.split_once('\t').unwrap_or((line, ""));
                CommitRecord {
                    hash: hash.to_string(),
                    subject: subject.to_string(),
                }
            })
            .collect())
    }

    fn change_stats(&self, hash: &str) -> Result<ChangeStats> {
        // Empty --pretty suppresses the header so message bodies cannot be
        // mistaken for summary lines.
        let summary = self.run_git(&["show", "--stat", "--pretty=format:", hash])?;
        parse_change_summary(&summary)
    }

    fn author_name(&self, hash: &str) -> Result<String> {
        let name = self.run_git(&["log", "-1", "--pretty=format:%an", hash])?;
        Ok(name.trim().to_string())
    }
}

/// Parse the summary trailer(s) of a `git show --stat` listing into totals.
///
/// A trailer looks like ` 3 files changed, 10 insertions(+), 98 deletions(-)`;
/// the count bound to each `insertions(+)` / `deletions(-)` token is the
/// whitespace token immediately before it. A commit normally carries exactly
/// one trailer, but repeated trailers are tolerated and summed. A side with
/// no token contributes 0.
pub fn parse_change_summary(summary: &str) -> Result<ChangeStats> {
    let mut stats = ChangeStats::default();

    for line in summary.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        for (i, token) in tokens.iter().enumerate() {
            let target = if is_count_token(token, "insertion") {
                &mut stats.added
            } else if is_count_token(token, "deletion") {
                &mut stats.deleted
            } else {
                continue;
            };

            let count = i
                .checked_sub(1)
                .and_then(|prev| tokens.get(prev))
                .ok_or_else(|| {
                    GredError::Parse(format!("no count before '{token}' in summary line"))
                })?;
            let count: u64 = count
                .parse()
                .map_err(|_| GredError::Parse(format!("bad count '{count}' in summary line")))?;
            *target += count;
        }
    }

    Ok(stats)
}

// Matches "insertion(+)" and "insertions(+)," but not a path like
// "insertion.rs".
fn is_count_token(token: &str, word: &str) -> bool {
    token
        .strip_prefix(word)
        .map(|rest| rest.strip_prefix('s').unwrap_or(rest).starts_with('('))
        .unwrap_or(false)
}
