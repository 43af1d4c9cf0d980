use crate::cli::CommonArgs;
use crate::git::{GitRepo, Vcs};
use crate::model::{ChangeStats, RedMatch, RedOutput, Thresholds, SCHEMA_VERSION};
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let since = common
        .since
        .clone()
        .unwrap_or_else(|| default_since(Utc::now()));
    let thresholds = Thresholds {
        since,
        min_lines: common.min_lines,
        min_pct: common.min_pct,
    };

    let text = !json && !ndjson;
    if text {
        println!("Searching for commits since {}...", thresholds.since);
    }

    let matches = find_red_commits(&repo, &thresholds, |m| {
        if text {
            println!("{}", format_match(m));
        }
    });

    if json {
        output_json(&matches, &repo, &thresholds)?;
    } else if ndjson {
        output_ndjson(&matches)?;
    }

    Ok(())
}

/// Default history window start: 30 days before `now`, calendar granularity.
pub fn default_since(now: DateTime<Utc>) -> String {
    (now - Duration::days(30)).format("%Y-%m-%d").to_string()
}

/// Walk the history window newest-first and collect the commits whose change
/// profile clears both thresholds. Matches are handed to `on_match` as they
/// are found, in input order.
///
/// Per-commit failures degrade rather than abort: a failed stats lookup
/// counts as `(0, 0)` (which any positive `min_lines` then discards) and a
/// failed author lookup leaves the author empty. Diagnostics go to stdout,
/// interleaved with the matches.
pub fn find_red_commits<V: Vcs>(
    vcs: &V,
    thresholds: &Thresholds,
    mut on_match: impl FnMut(&RedMatch),
) -> Vec<RedMatch> {
    let commits = match vcs.commits_since(&thresholds.since) {
        Ok(commits) => commits,
        Err(e) => {
            println!("Error retrieving git log: {e}");
            Vec::new()
        }
    };

    let mut matches = Vec::new();
    for commit in &commits {
        if commit.is_merge() {
            continue;
        }

        let stats = match vcs.change_stats(&commit.hash) {
            Ok(stats) => stats,
            Err(e) => {
                println!(
                    "Error retrieving diff stats for commit {}: {e}",
                    commit.short_hash()
                );
                ChangeStats::default()
            }
        };

        if stats.total() < thresholds.min_lines {
            continue;
        }
        let percent_deleted = stats.percent_deleted();
        if percent_deleted < thresholds.min_pct as f64 {
            continue;
        }

        let author = match vcs.author_name(&commit.hash) {
            Ok(author) => author,
            Err(e) => {
                println!(
                    "Error retrieving author for commit {}: {e}",
                    commit.short_hash()
                );
                String::new()
            }
        };

        let m = RedMatch {
            hash: commit.hash.clone(),
            author,
            added: stats.added,
            deleted: stats.deleted,
            percent_deleted,
        };
        on_match(&m);
        matches.push(m);
    }

    matches
}

pub fn format_match(m: &RedMatch) -> String {
    format!(
        "{} | {:>5}, {:>6} | {:>3.0}% | {}",
        crate::model::short_hash(&m.hash),
        format!("+{}", m.added),
        format!("-{}", m.deleted),
        m.percent_deleted,
        m.author
    )
}

fn output_json(matches: &[RedMatch], repo: &GitRepo, thresholds: &Thresholds) -> anyhow::Result<()> {
    let output = RedOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        since: thresholds.since.clone(),
        min_lines: thresholds.min_lines,
        min_pct: thresholds.min_pct,
        matches: matches.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(matches: &[RedMatch]) -> anyhow::Result<()> {
    for m in matches {
        println!("{}", serde_json::to_string(m)?);
    }
    Ok(())
}
