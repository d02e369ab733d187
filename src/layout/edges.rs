use crate::model::{Commit, CommitModel};

use super::error::{LayoutError, Relation};
use super::types::{EdgeKind, EdgeLayout, EdgePath, Point};

/// Picks the connector between two placed commits: a segment when they share
/// a lane, otherwise a curve bending at the horizontal midpoint.
pub fn edge_geometry(from: Point, to: Point) -> (EdgeKind, EdgePath) {
    if (from.y - to.y).abs() < f32::EPSILON {
        return (EdgeKind::Straight, EdgePath::Line { from, to });
    }
    // Diagonal with x and y swapped: the curve leaves and enters horizontally.
    let mid_x = (from.x + to.x) / 2.0;
    (
        EdgeKind::Curved,
        EdgePath::Curve {
            source: from,
            target: to,
            control1: Point::new(mid_x, from.y),
            control2: Point::new(mid_x, to.y),
        },
    )
}

fn placed(commit: &Commit) -> Option<Point> {
    Some(Point::new(commit.x?, commit.y?))
}

/// One descriptor per (commit, child) pair, in commit order then child order.
/// Missing endpoints are reported per edge; the rest of the graph is kept.
pub(super) fn resolve_edges(model: &CommitModel, errors: &mut Vec<LayoutError>) -> Vec<EdgeLayout> {
    let mut edges = Vec::new();
    for commit in model.commits() {
        for parent in &commit.parents {
            if !model.contains(parent) {
                errors.push(LayoutError::DanglingReference {
                    from: commit.sha.clone(),
                    to: parent.clone(),
                    relation: Relation::Parent,
                });
            }
        }

        for child_sha in &commit.children {
            let child = match model.get_commit(child_sha) {
                Ok(child) => child,
                Err(_) => {
                    errors.push(LayoutError::DanglingReference {
                        from: commit.sha.clone(),
                        to: child_sha.clone(),
                        relation: Relation::Child,
                    });
                    continue;
                }
            };
            let (Some(from), Some(to)) = (placed(commit), placed(child)) else {
                errors.push(LayoutError::UnplacedEdge {
                    from: commit.sha.clone(),
                    to: child.sha.clone(),
                });
                continue;
            };
            let (kind, path) = edge_geometry(from, to);
            edges.push(EdgeLayout {
                from_sha: commit.sha.clone(),
                to_sha: child.sha.clone(),
                kind,
                path,
                color: commit.color.clone(),
            });
        }
    }
    log::debug!("resolved {} edges", edges.len());
    edges
}
