use serde::Serialize;

use super::error::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Straight,
    Curved,
}

/// Geometry of one parent/child connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgePath {
    Line {
        from: Point,
        to: Point,
    },
    /// Cubic curve whose control points sit at the horizontal midpoint, one on
    /// each lane, giving the S-shaped connector between lanes.
    Curve {
        source: Point,
        target: Point,
        control1: Point,
        control2: Point,
    },
}

impl EdgePath {
    pub fn svg_d(&self) -> String {
        match self {
            EdgePath::Line { from, to } => {
                format!("M {} {} L {} {}", from.x, from.y, to.x, to.y)
            }
            EdgePath::Curve {
                source,
                target,
                control1,
                control2,
            } => format!(
                "M {} {} C {} {}, {} {}, {} {}",
                source.x, source.y, control1.x, control1.y, control2.x, control2.y, target.x, target.y
            ),
        }
    }

    pub fn points(&self) -> Vec<Point> {
        match self {
            EdgePath::Line { from, to } => vec![*from, *to],
            EdgePath::Curve {
                source,
                target,
                control1,
                control2,
            } => vec![*source, *control1, *control2, *target],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitLayout {
    pub sha: String,
    pub branch: String,
    pub author: String,
    pub message: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub color: Option<String>,
}

impl CommitLayout {
    pub fn position(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchLayout {
    pub name: String,
    pub lane: Option<f32>,
    pub color: Option<String>,
    pub start: Option<f32>,
    pub end: Option<f32>,
    pub commit_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeLayout {
    pub from_sha: String,
    pub to_sha: String,
    pub kind: EdgeKind,
    pub path: EdgePath,
    /// Color of the parent's branch.
    pub color: Option<String>,
}

/// Output of one render pass. Read-only once built; a new pass replaces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPass {
    pub commits: Vec<CommitLayout>,
    pub branches: Vec<BranchLayout>,
    pub edges: Vec<EdgeLayout>,
    pub errors: Vec<LayoutError>,
    pub width: f32,
    pub height: f32,
}

impl LayoutPass {
    pub fn empty() -> Self {
        Self {
            commits: Vec::new(),
            branches: Vec::new(),
            edges: Vec::new(),
            errors: Vec::new(),
            width: 1.0,
            height: 1.0,
        }
    }

    pub fn commit(&self, sha: &str) -> Option<&CommitLayout> {
        self.commits.iter().find(|c| c.sha == sha)
    }

    pub fn branch(&self, name: &str) -> Option<&BranchLayout> {
        self.branches.iter().find(|b| b.name == name)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&EdgeLayout> {
        self.edges
            .iter()
            .find(|e| e.from_sha == from && e.to_sha == to)
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
