use crate::model::{CommitModel, XRange};

/// Global x counter shared by every branch: the i-th commit of a pass sits at
/// `base_offset + i * step`.
///
/// The product is formed in `f64` so the index never rounds; the result is
/// still an `f32` coordinate, which stays strictly increasing while
/// consecutive values differ by more than one ulp (about 2^24 steps past the
/// base for the default spacing).
#[derive(Debug, Clone)]
pub struct XPositionGenerator {
    base_offset: f32,
    step: f32,
    issued: usize,
}

impl XPositionGenerator {
    pub fn new(base_offset: f32, step: f32) -> Self {
        Self {
            base_offset,
            step,
            issued: 0,
        }
    }

    pub fn next_x(&mut self) -> f32 {
        let x = (f64::from(self.base_offset) + self.issued as f64 * f64::from(self.step)) as f32;
        self.issued += 1;
        x
    }

    pub fn issued(&self) -> usize {
        self.issued
    }
}

/// Stamps x on every commit in traversal order and grows the owning branch's
/// span as it goes. With `anchor_at_fork`, a branch's span starts at the
/// parent it forked from when that parent lies on another branch.
pub(super) fn assign_x_positions(
    model: &mut CommitModel,
    generator: &mut XPositionGenerator,
    anchor_at_fork: bool,
) {
    for commit in model.commits_mut() {
        commit.x = Some(generator.next_x());
    }

    let mut sightings: Vec<(String, f32, Option<f32>)> = Vec::with_capacity(model.len());
    for commit in model.commits() {
        let Some(x) = commit.x else { continue };
        let fork_x = if anchor_at_fork {
            commit
                .parents
                .iter()
                .filter_map(|sha| model.get_commit(sha).ok())
                .filter(|parent| parent.branch != commit.branch)
                .filter_map(|parent| parent.x)
                .reduce(f32::min)
        } else {
            None
        };
        sightings.push((commit.branch.clone(), x, fork_x));
    }

    for (name, x, fork_x) in sightings {
        if let Some(branch) = model.branch_mut(&name) {
            match branch.span.as_mut() {
                Some(span) => span.end = x,
                None => {
                    let mut span = XRange::at(x);
                    if let Some(fork_x) = fork_x {
                        span.start = span.start.min(fork_x);
                    }
                    branch.span = Some(span);
                }
            }
        }
    }
    log::debug!("stamped x on {} commits", generator.issued());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::RepoSnapshot;

    #[test]
    fn counter_is_strictly_increasing() {
        let mut generator = XPositionGenerator::new(40.0, 30.0);
        let xs: Vec<f32> = (0..4).map(|_| generator.next_x()).collect();
        assert_eq!(xs, vec![40.0, 70.0, 100.0, 130.0]);
        assert_eq!(generator.issued(), 4);
    }

    #[test]
    fn spans_track_first_and_last_sighting() {
        let mut snapshot = RepoSnapshot::new();
        snapshot.add_branch("master");
        snapshot.add_commit("c0", "master", &[]);
        snapshot.add_commit("d0", "dev", &["c0"]);
        snapshot.add_commit("c1", "master", &["c0"]);
        snapshot.add_commit("d1", "dev", &["d0"]);
        let mut model = CommitModel::from_snapshot(snapshot).unwrap();
        let mut generator = XPositionGenerator::new(40.0, 30.0);
        assign_x_positions(&mut model, &mut generator, false);

        let xs: Vec<f32> = model.commits().iter().filter_map(|c| c.x).collect();
        assert_eq!(xs, vec![40.0, 70.0, 100.0, 130.0]);
        assert_eq!(
            model.branch("master").unwrap().span,
            Some(XRange { start: 40.0, end: 100.0 })
        );
        assert_eq!(
            model.branch("dev").unwrap().span,
            Some(XRange { start: 70.0, end: 130.0 })
        );
    }

    #[test]
    fn fork_point_anchors_span_start() {
        let mut snapshot = RepoSnapshot::new();
        snapshot.add_branch("master");
        snapshot.add_commit("c0", "master", &[]);
        snapshot.add_commit("c1", "master", &["c0"]);
        snapshot.add_commit("d0", "dev", &["c0"]);
        snapshot.add_commit("d1", "dev", &["d0"]);
        let mut model = CommitModel::from_snapshot(snapshot.clone()).unwrap();
        assign_x_positions(&mut model, &mut XPositionGenerator::new(40.0, 30.0), true);
        assert_eq!(
            model.branch("dev").unwrap().span,
            Some(XRange { start: 40.0, end: 130.0 })
        );
        assert_eq!(
            model.branch("master").unwrap().span,
            Some(XRange { start: 40.0, end: 70.0 })
        );

        let mut model = CommitModel::from_snapshot(snapshot).unwrap();
        assign_x_positions(&mut model, &mut XPositionGenerator::new(40.0, 30.0), false);
        assert_eq!(
            model.branch("dev").unwrap().span,
            Some(XRange { start: 100.0, end: 130.0 })
        );
    }

    #[test]
    fn index_past_f32_mantissa_keeps_increasing() {
        let mut generator = XPositionGenerator::new(40.0, 30.0);
        generator.issued = 1 << 24;
        let first = generator.next_x();
        let second = generator.next_x();
        assert!(second > first);
        assert_eq!(first, (40.0f64 + 16_777_216.0 * 30.0) as f32);
    }

    #[test]
    fn separate_generators_do_not_share_state() {
        let mut first = XPositionGenerator::new(0.0, 10.0);
        first.next_x();
        first.next_x();
        let mut second = XPositionGenerator::new(0.0, 10.0);
        assert_eq!(second.next_x(), 0.0);
    }
}
