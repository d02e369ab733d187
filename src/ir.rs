use serde::{Deserialize, Serialize};

/// Repository snapshot as produced by the ingestion side.
///
/// The order of `commits` is the traversal order used for layout: a commit
/// never precedes a parent it was derived from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoSnapshot {
    #[serde(default)]
    pub branches: Vec<BranchRecord>,
    #[serde(default)]
    pub commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRecord {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    #[serde(default, alias = "parentShas")]
    pub parents: Vec<String>,
    #[serde(default, alias = "childShas")]
    pub children: Vec<String>,
    pub branch: String,
    #[serde(default)]
    pub author: AuthorRecord,
    #[serde(default)]
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorRecord {
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitDetails {
    #[serde(default)]
    pub message: String,
}

impl CommitRecord {
    pub fn new(sha: &str, branch: &str) -> Self {
        Self {
            sha: sha.to_string(),
            parents: Vec::new(),
            children: Vec::new(),
            branch: branch.to_string(),
            author: AuthorRecord::default(),
            commit: CommitDetails::default(),
        }
    }
}

impl RepoSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_branch(&mut self, name: &str) {
        self.branches.push(BranchRecord {
            name: name.to_string(),
        });
    }

    /// Appends a commit on `branch` and links it to `parents`, keeping the
    /// parent/child lists symmetric for commits already in the snapshot.
    pub fn add_commit(&mut self, sha: &str, branch: &str, parents: &[&str]) {
        let mut record = CommitRecord::new(sha, branch);
        for parent in parents {
            record.parents.push(parent.to_string());
            if let Some(existing) = self.commits.iter_mut().find(|c| c.sha == *parent) {
                existing.children.push(sha.to_string());
            }
        }
        self.commits.push(record);
    }
}

/// Parses a snapshot document. Strict JSON is tried first; JSON5 is accepted
/// as a fallback so hand-written fixtures may carry comments.
pub fn parse_snapshot(input: &str) -> anyhow::Result<RepoSnapshot> {
    match serde_json::from_str::<RepoSnapshot>(input) {
        Ok(snapshot) => Ok(snapshot),
        Err(json_err) => match json5::from_str::<RepoSnapshot>(input) {
            Ok(snapshot) => Ok(snapshot),
            Err(_) => Err(anyhow::anyhow!("invalid repository snapshot: {json_err}")),
        },
    }
}
