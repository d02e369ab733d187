mod color;
mod edges;
mod error;
mod lanes;
mod position;
pub(crate) mod types;
pub use color::ColorAssigner;
pub use edges::edge_geometry;
pub use error::{LayoutError, Relation};
pub use lanes::{LaneAllocator, TakenLane};
pub use position::XPositionGenerator;
pub use types::*;

use color::assign_colors;
use edges::resolve_edges;
use lanes::allocate_lanes;
use position::assign_x_positions;

use crate::config::LayoutConfig;
use crate::model::CommitModel;

/// Runs one full render pass: x positions, lanes, colors, then edges.
///
/// The input model is left untouched; the pass works on its own copy so
/// repeated calls over the same model give identical output. Faults are
/// collected into `LayoutPass::errors` and never abort the pass.
pub fn compute_layout(model: &CommitModel, config: &LayoutConfig) -> LayoutPass {
    let mut model = model.clone();
    model.clear_layout();
    let mut errors = Vec::new();

    let mut generator = XPositionGenerator::new(config.base_offset, config.commit_step);
    assign_x_positions(&mut model, &mut generator, config.anchor_span_at_fork);
    allocate_lanes(&mut model, config, &mut errors);
    assign_colors(&mut model, &config.palette);
    let edges = resolve_edges(&model, &mut errors);

    for err in &errors {
        log::warn!("{err}");
    }

    let commits: Vec<CommitLayout> = model
        .commits()
        .iter()
        .map(|commit| CommitLayout {
            sha: commit.sha.clone(),
            branch: commit.branch.clone(),
            author: commit.author.clone(),
            message: commit.message.clone(),
            x: commit.x,
            y: commit.y,
            color: commit.color.clone(),
        })
        .collect();
    let branches: Vec<BranchLayout> = model
        .branches()
        .iter()
        .map(|branch| BranchLayout {
            name: branch.name.clone(),
            lane: branch.lane,
            color: branch.color.clone(),
            start: branch.span.map(|span| span.start),
            end: branch.span.map(|span| span.end),
            commit_count: branch.commit_count,
        })
        .collect();

    let (width, height) = diagram_extent(&commits, config);

    LayoutPass {
        commits,
        branches,
        edges,
        errors,
        width,
        height,
    }
}

/// Extent measured from the origin, since coordinates are absolute.
fn diagram_extent(commits: &[CommitLayout], config: &LayoutConfig) -> (f32, f32) {
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for point in commits.iter().filter_map(CommitLayout::position) {
        max_x = max_x.max(point.x + config.commit_radius);
        max_y = max_y.max(point.y + config.commit_radius);
    }
    if !max_x.is_finite() {
        return (1.0, 1.0);
    }
    let width = (max_x + config.diagram_padding).max(1.0);
    let height = (max_y + config.diagram_padding).max(1.0);
    (width, height)
}
