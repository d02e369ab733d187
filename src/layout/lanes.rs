use crate::config::LayoutConfig;
use crate::model::{CommitModel, XRange};

use super::error::LayoutError;

/// A lane rung held by some branch over a horizontal span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakenLane {
    pub rung: usize,
    pub span: XRange,
}

/// First-fit lane allocation over the ladder `base + rung * step`.
///
/// Each request probes rungs from the bottom up and takes the first one on
/// which no reserved span overlaps its own. Probing is bounded by
/// `max_probes`; a branch that exhausts it is reported instead of looping.
#[derive(Debug, Clone)]
pub struct LaneAllocator {
    base: f32,
    step: f32,
    max_probes: usize,
    taken: Vec<TakenLane>,
}

impl LaneAllocator {
    pub fn new(base: f32, step: f32, max_probes: usize) -> Self {
        Self {
            base,
            step,
            max_probes,
            taken: Vec::new(),
        }
    }

    pub fn lane_of(&self, rung: usize) -> f32 {
        self.base + rung as f32 * self.step
    }

    /// Reserves `span` on `rung` without probing.
    pub fn reserve(&mut self, rung: usize, span: XRange) {
        self.taken.push(TakenLane { rung, span });
    }

    pub fn is_free(&self, rung: usize, span: &XRange) -> bool {
        !self
            .taken
            .iter()
            .any(|taken| taken.rung == rung && span.overlaps(&taken.span))
    }

    pub fn assign(&mut self, branch: &str, span: XRange) -> Result<f32, LayoutError> {
        for rung in 0..self.max_probes {
            if self.is_free(rung, &span) {
                self.reserve(rung, span);
                return Ok(self.lane_of(rung));
            }
        }
        Err(LayoutError::UnresolvableLane {
            branch: branch.to_string(),
            probes: self.max_probes,
        })
    }

    pub fn taken(&self) -> &[TakenLane] {
        &self.taken
    }
}

/// Resolves every branch lane, then stamps y on the commits. Stamping waits
/// until all lanes are known since spans are only final after the x pass.
pub(super) fn allocate_lanes(
    model: &mut CommitModel,
    config: &LayoutConfig,
    errors: &mut Vec<LayoutError>,
) {
    // Every earlier branch blocks at most one rung, so one more always fits.
    let max_probes = model.branches().len() + 1;
    let mut allocator = LaneAllocator::new(config.base_lane, config.lane_step, max_probes);

    if let Some(root) = model.branch_mut(&config.root_branch) {
        root.lane = Some(config.base_lane);
        if let Some(span) = root.span {
            allocator.reserve(0, span);
        }
    }

    for branch in model.branches_mut() {
        if branch.name == config.root_branch {
            continue;
        }
        let Some(span) = branch.span else {
            if branch.commit_count > 0 {
                errors.push(LayoutError::MissingBranchSpan {
                    branch: branch.name.clone(),
                });
            }
            continue;
        };
        match allocator.assign(&branch.name, span) {
            Ok(lane) => branch.lane = Some(lane),
            Err(err) => errors.push(err),
        }
    }

    let lanes: Vec<Option<f32>> = model
        .commits()
        .iter()
        .map(|commit| model.branch(&commit.branch).and_then(|b| b.lane))
        .collect();
    for (commit, lane) in model.commits_mut().iter_mut().zip(lanes) {
        commit.y = lane;
    }
    log::debug!(
        "resolved lanes for {} branches over {} reservations",
        model.branches().len(),
        allocator.taken().len()
    );
}
