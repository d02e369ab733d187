use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Parent,
    Child,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Parent => f.write_str("parent"),
            Relation::Child => f.write_str("child"),
        }
    }
}

/// Faults collected during a pass. None of them aborts the pass; each is
/// attached to the commit, edge or branch it concerns.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutError {
    #[error("commit {from} references missing {relation} {to}")]
    DanglingReference {
        from: String,
        to: String,
        relation: Relation,
    },
    #[error("no free lane for branch {branch} after {probes} probes")]
    UnresolvableLane { branch: String, probes: usize },
    #[error("branch {branch} has commits but no recorded span")]
    MissingBranchSpan { branch: String },
    #[error("edge {from} -> {to} not drawn: endpoint has no position")]
    UnplacedEdge { from: String, to: String },
}
