#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod render;
pub mod stats;
pub mod store;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{RepoSnapshot, parse_snapshot};
pub use layout::{LayoutError, LayoutPass, compute_layout};
pub use model::{CommitModel, ModelError};
pub use render::render_svg;
pub use stats::{RepoStats, analyze_repo};
pub use store::LayoutStore;
pub use theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn midnight() -> Self {
        Self {
            theme: Theme::midnight(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Parses a repository snapshot, lays it out and renders SVG in one call.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let snapshot = parse_snapshot(input)?;
    let model = CommitModel::from_snapshot(snapshot)?;
    let pass = compute_layout(&model, &options.layout);
    Ok(render_svg(&pass, &options.theme, &options.layout))
}
