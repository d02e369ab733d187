use commit_graph_renderer::config::LayoutConfig;
use commit_graph_renderer::ir::{RepoSnapshot, parse_snapshot};
use commit_graph_renderer::layout::compute_layout;
use commit_graph_renderer::model::CommitModel;
use commit_graph_renderer::render::render_svg;
use commit_graph_renderer::theme::Theme;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Trunk of `trunk_len` commits with a feature branch forking every
/// `fork_every` commits. Each feature carries `feature_len` commits and merges
/// back into the trunk, so spans overlap and the lane ladder gets exercised.
fn synthetic_repo(trunk_len: usize, fork_every: usize, feature_len: usize) -> RepoSnapshot {
    let mut snapshot = RepoSnapshot::new();
    snapshot.add_branch("master");
    if trunk_len == 0 {
        return snapshot;
    }
    snapshot.add_commit("m0", "master", &[]);
    let mut open: Vec<(String, String, usize)> = Vec::new();
    let mut trunk_tip = "m0".to_string();

    for i in 1..trunk_len {
        let mut still_open = Vec::with_capacity(open.len());
        let mut merge_parent: Option<String> = None;
        for (branch, tip, done) in open.drain(..) {
            if done == feature_len && merge_parent.is_none() {
                merge_parent = Some(tip);
                continue;
            }
            if done < feature_len {
                let sha = format!("{branch}-{done}");
                snapshot.add_commit(&sha, &branch, &[tip.as_str()]);
                still_open.push((branch, sha, done + 1));
            } else {
                still_open.push((branch, tip, done));
            }
        }
        open = still_open;

        let sha = format!("m{i}");
        match merge_parent.as_deref() {
            Some(feature_tip) => {
                snapshot.add_commit(&sha, "master", &[trunk_tip.as_str(), feature_tip])
            }
            None => snapshot.add_commit(&sha, "master", &[trunk_tip.as_str()]),
        }
        trunk_tip = sha;

        if fork_every > 0 && i % fork_every == 0 {
            let branch = format!("feature-{i}");
            snapshot.add_branch(&branch);
            let first = format!("{branch}-0");
            snapshot.add_commit(&first, &branch, &[trunk_tip.as_str()]);
            open.push((branch, first, 1));
        }
    }
    snapshot
}

fn scenarios() -> Vec<(&'static str, RepoSnapshot)> {
    vec![
        ("linear_100", synthetic_repo(100, 0, 0)),
        ("few_branches_200", synthetic_repo(200, 25, 6)),
        ("busy_500", synthetic_repo(500, 5, 12)),
        ("busy_2000", synthetic_repo(2000, 4, 20)),
    ]
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, snapshot) in scenarios() {
        let input = serde_json::to_string(&snapshot).expect("serialize failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let parsed = parse_snapshot(black_box(data)).expect("parse failed");
                black_box(parsed.commits.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for (name, snapshot) in scenarios() {
        let model = CommitModel::from_snapshot(snapshot).expect("model failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &model, |b, model| {
            b.iter(|| {
                let pass = compute_layout(black_box(model), &config);
                black_box(pass.edges.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    for (name, snapshot) in scenarios() {
        let model = CommitModel::from_snapshot(snapshot).expect("model failed");
        let pass = compute_layout(&model, &config);
        group.bench_with_input(BenchmarkId::from_parameter(name), &pass, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &theme, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_layout, bench_render
);
criterion_main!(benches);
