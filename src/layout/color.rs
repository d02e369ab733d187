use std::collections::HashSet;

use crate::model::CommitModel;

/// Hands out palette entries in call order, wrapping once the palette is
/// exhausted.
pub struct ColorAssigner<'a> {
    palette: &'a [String],
    next: usize,
}

impl<'a> ColorAssigner<'a> {
    pub fn new(palette: &'a [String]) -> Self {
        Self { palette, next: 0 }
    }

    pub fn next_color(&mut self) -> Option<&'a str> {
        if self.palette.is_empty() {
            return None;
        }
        let color = &self.palette[self.next % self.palette.len()];
        self.next += 1;
        Some(color.as_str())
    }
}

/// Branches in the order their first commit appears in the commit list,
/// followed by branches that own no commit, in table order.
pub(super) fn branch_discovery_order(model: &CommitModel) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(model.branches().len());
    let mut order: Vec<String> = Vec::with_capacity(model.branches().len());
    let names = model
        .commits()
        .iter()
        .map(|commit| commit.branch.as_str())
        .chain(model.branches().iter().map(|branch| branch.name.as_str()));
    for name in names {
        if seen.insert(name) {
            order.push(name.to_string());
        }
    }
    order
}

pub(super) fn assign_colors(model: &mut CommitModel, palette: &[String]) {
    let mut assigner = ColorAssigner::new(palette);
    for name in branch_discovery_order(model) {
        let color = assigner.next_color().map(str::to_string);
        if let Some(branch) = model.branch_mut(&name) {
            branch.color = color;
        }
    }
    let colors: Vec<Option<String>> = model
        .commits()
        .iter()
        .map(|commit| model.branch(&commit.branch).and_then(|b| b.color.clone()))
        .collect();
    for (commit, color) in model.commits_mut().iter_mut().zip(colors) {
        commit.color = color;
    }
    log::debug!("assigned colors to {} branches", model.branches().len());
}
