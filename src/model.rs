use std::collections::HashMap;

use thiserror::Error;

use crate::ir::RepoSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("commit {sha} not found")]
    NotFound { sha: String },
    #[error("commit {sha} appears more than once")]
    DuplicateCommit { sha: String },
    #[error("branch {name} appears more than once")]
    DuplicateBranch { name: String },
    #[error("commit record #{index} has an empty {field}")]
    MissingField { index: usize, field: &'static str },
}

/// Horizontal extent of a branch in assigned x-coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XRange {
    pub start: f32,
    pub end: f32,
}

impl XRange {
    pub fn at(x: f32) -> Self {
        Self { start: x, end: x }
    }

    /// Closed-interval intersection. Spans that merely touch at one x-value
    /// count as overlapping, and so does a span that swallows `other` whole.
    pub fn overlaps(&self, other: &XRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

#[derive(Debug, Clone)]
pub struct Commit {
    pub sha: String,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub branch: String,
    pub author: String,
    pub message: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Branch {
    pub name: String,
    pub commit_count: usize,
    pub span: Option<XRange>,
    pub lane: Option<f32>,
    pub color: Option<String>,
}

impl Branch {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commit_count: 0,
            span: None,
            lane: None,
            color: None,
        }
    }
}

/// Commits in traversal order plus the branch table, with sha and name
/// lookups. Built once per render pass.
#[derive(Debug, Clone, Default)]
pub struct CommitModel {
    commits: Vec<Commit>,
    commit_index: HashMap<String, usize>,
    branches: Vec<Branch>,
    branch_index: HashMap<String, usize>,
}

impl CommitModel {
    pub fn from_snapshot(snapshot: RepoSnapshot) -> Result<Self, ModelError> {
        let mut model = CommitModel::default();
        for record in snapshot.branches {
            if model.branch_index.contains_key(&record.name) {
                return Err(ModelError::DuplicateBranch { name: record.name });
            }
            model.push_branch(&record.name);
        }

        for (index, record) in snapshot.commits.into_iter().enumerate() {
            if record.sha.trim().is_empty() {
                return Err(ModelError::MissingField { index, field: "sha" });
            }
            if record.branch.trim().is_empty() {
                return Err(ModelError::MissingField {
                    index,
                    field: "branch",
                });
            }
            if model.commit_index.contains_key(&record.sha) {
                return Err(ModelError::DuplicateCommit { sha: record.sha });
            }
            let branch_idx = match model.branch_index.get(&record.branch) {
                Some(idx) => *idx,
                None => {
                    log::debug!(
                        "branch {} not in branch table, registering from commit {}",
                        record.branch,
                        record.sha
                    );
                    model.push_branch(&record.branch)
                }
            };
            model.branches[branch_idx].commit_count += 1;
            model
                .commit_index
                .insert(record.sha.clone(), model.commits.len());
            model.commits.push(Commit {
                sha: record.sha,
                parents: record.parents,
                children: record.children,
                branch: record.branch,
                author: record.author.login,
                message: record.commit.message,
                x: None,
                y: None,
                color: None,
            });
        }
        Ok(model)
    }

    fn push_branch(&mut self, name: &str) -> usize {
        let idx = self.branches.len();
        self.branches.push(Branch::new(name));
        self.branch_index.insert(name.to_string(), idx);
        idx
    }

    pub fn get_commit(&self, sha: &str) -> Result<&Commit, ModelError> {
        self.commit_index
            .get(sha)
            .map(|idx| &self.commits[*idx])
            .ok_or_else(|| ModelError::NotFound {
                sha: sha.to_string(),
            })
    }

    pub fn contains(&self, sha: &str) -> bool {
        self.commit_index.contains_key(sha)
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub(crate) fn commits_mut(&mut self) -> &mut [Commit] {
        &mut self.commits
    }

    /// Branch table in first-appearance order: declared branches first, then
    /// branches first seen on a commit.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub(crate) fn branches_mut(&mut self) -> &mut [Branch] {
        &mut self.branches
    }

    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branch_index.get(name).map(|idx| &self.branches[*idx])
    }

    pub(crate) fn branch_mut(&mut self, name: &str) -> Option<&mut Branch> {
        let idx = *self.branch_index.get(name)?;
        Some(&mut self.branches[idx])
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Drops every derived attribute so a pass can start from scratch.
    pub(crate) fn clear_layout(&mut self) {
        for commit in &mut self.commits {
            commit.x = None;
            commit.y = None;
            commit.color = None;
        }
        for branch in &mut self.branches {
            branch.span = None;
            branch.lane = None;
            branch.color = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::RepoSnapshot;

    fn linear() -> RepoSnapshot {
        let mut snapshot = RepoSnapshot::new();
        snapshot.add_branch("master");
        snapshot.add_commit("c0", "master", &[]);
        snapshot.add_commit("c1", "master", &["c0"]);
        snapshot
    }

    #[test]
    fn looks_up_commits_by_sha() {
        let model = CommitModel::from_snapshot(linear()).unwrap();
        assert_eq!(model.len(), 2);
        let c1 = model.get_commit("c1").unwrap();
        assert_eq!(c1.parents, vec!["c0"]);
        assert!(c1.x.is_none());
    }

    #[test]
    fn missing_sha_is_not_found() {
        let model = CommitModel::from_snapshot(linear()).unwrap();
        assert_eq!(
            model.get_commit("nope").unwrap_err(),
            ModelError::NotFound {
                sha: "nope".to_string()
            }
        );
    }

    #[test]
    fn rejects_duplicate_commits() {
        let mut snapshot = linear();
        snapshot.add_commit("c0", "master", &[]);
        let err = CommitModel::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateCommit { sha } if sha == "c0"));
    }

    #[test]
    fn rejects_duplicate_branches() {
        let mut snapshot = linear();
        snapshot.add_branch("master");
        let err = CommitModel::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateBranch { .. }));
    }

    #[test]
    fn rejects_empty_branch_name() {
        let mut snapshot = linear();
        snapshot.add_commit("c2", " ", &["c1"]);
        let err = CommitModel::from_snapshot(snapshot).unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingField {
                index: 2,
                field: "branch"
            }
        );
    }

    #[test]
    fn registers_undeclared_branches_in_sighting_order() {
        let mut snapshot = linear();
        snapshot.add_commit("f0", "feature", &["c1"]);
        snapshot.add_commit("h0", "hotfix", &["c1"]);
        snapshot.add_commit("f1", "feature", &["f0"]);
        let model = CommitModel::from_snapshot(snapshot).unwrap();
        let names: Vec<&str> = model.branches().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["master", "feature", "hotfix"]);
        assert_eq!(model.branch("feature").unwrap().commit_count, 2);
    }

    #[test]
    fn closed_interval_overlap() {
        let a = XRange { start: 40.0, end: 100.0 };
        assert!(XRange { start: 100.0, end: 160.0 }.overlaps(&a));
        assert!(XRange { start: 10.0, end: 40.0 }.overlaps(&a));
        assert!(XRange { start: 70.0, end: 70.0 }.overlaps(&a));
        assert!(XRange { start: 10.0, end: 190.0 }.overlaps(&a));
        assert!(!XRange { start: 130.0, end: 160.0 }.overlaps(&a));
    }
}
