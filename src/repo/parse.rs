//! Parsers for git plumbing output

use crate::types::{GitRemote, WorkingCopyStatus};
use std::collections::BTreeMap;

/// Two-letter status codes git uses for unmerged paths
const CONFLICT_CODES: [&str; 7] = ["DD", "AU", "UD", "UA", "DU", "AA", "UU"];

/// Parse `git status --porcelain=v1` output into grouped path lists.
///
/// The current branch is not part of this output and is left as `None`.
pub fn parse_porcelain_status(output: &str) -> WorkingCopyStatus {
    let mut status = WorkingCopyStatus::default();

    for line in output.lines() {
        if line.len() < 4 {
            continue;
        }
        let (code, path) = line.split_at(2);
        let path = path[1..].to_string();

        if code == "??" {
            status.not_added.push(path);
            continue;
        }
        if code == "!!" {
            continue;
        }
        if CONFLICT_CODES.contains(&code) {
            status.conflicted.push(path);
            continue;
        }

        let mut chars = code.chars();
        let index = chars.next().unwrap_or(' ');
        let worktree = chars.next().unwrap_or(' ');

        if index == 'R' || worktree == 'R' {
            // "old -> new"
            let new_path = path
                .split_once(" -> ")
                .map_or(path.as_str(), |(_, new)| new);
            status.renamed.push(new_path.to_string());
        } else if index == 'A' || index == 'C' {
            status.created.push(path);
        } else if index == 'D' || worktree == 'D' {
            status.deleted.push(path);
        } else if matches!(index, 'M' | 'T') || matches!(worktree, 'M' | 'T') {
            status.modified.push(path);
        }
    }

    status
}

/// Parse `git for-each-ref --format='%(refname:short) %(objectname)' refs/heads`.
pub fn parse_branch_list(output: &str) -> BTreeMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let (name, commit) = line.trim().split_once(' ')?;
            Some((name.to_string(), commit.trim().to_string()))
        })
        .collect()
}

/// Parse `git remote -v`, keeping the push URL of each remote.
pub fn parse_remote_list(output: &str) -> Vec<GitRemote> {
    let mut remotes: Vec<GitRemote> = Vec::new();

    for line in output.lines() {
        let Some((name, rest)) = line.split_once('\t') else {
            continue;
        };
        let Some(url) = rest.strip_suffix(" (push)") else {
            continue;
        };
        if !remotes.iter().any(|r| r.name == name) {
            remotes.push(GitRemote {
                name: name.to_string(),
                push_url: url.trim().to_string(),
            });
        }
    }

    remotes
}
