use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::CommitModel;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoStats {
    pub branches: BTreeMap<String, usize>,
    pub contributors: BTreeMap<String, usize>,
}

/// Commit counts per branch and per author login. Every branch in the table
/// is listed, including ones with no commits.
pub fn analyze_repo(model: &CommitModel) -> RepoStats {
    let mut stats = RepoStats::default();
    for branch in model.branches() {
        stats.branches.insert(branch.name.clone(), 0);
    }
    for commit in model.commits() {
        *stats.branches.entry(commit.branch.clone()).or_insert(0) += 1;
        *stats.contributors.entry(commit.author.clone()).or_insert(0) += 1;
    }
    stats
}
