use crate::theme::Theme;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const BRANCH_PALETTE: [&str; 9] = [
    "#FA8072", // salmon
    "#7D3C98", // purple
    "#2471A3", // blue
    "#F1C40F", // yellow
    "#E67E22", // orange
    "#A93226", // red
    "#17A589", // aqua
    "#839192", // grey
    "#000000", // black
];

/// Smallest accepted `commitStep`/`laneStep`. Anything finer stops
/// separating neighbouring commits and lanes once coordinates grow.
pub const MIN_STEP: f32 = 1.0;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Branch pinned to `base_lane`, never subject to collision resolution.
    pub root_branch: String,
    pub base_offset: f32,
    pub commit_step: f32,
    pub base_lane: f32,
    pub lane_step: f32,
    /// Start a branch's span at the commit it forked from rather than at its
    /// own first commit.
    pub anchor_span_at_fork: bool,
    pub palette: Vec<String>,
    pub commit_radius: f32,
    pub edge_stroke_width: f32,
    pub diagram_padding: f32,
    pub show_diagnostics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_branch: "master".to_string(),
            base_offset: 40.0,
            commit_step: 30.0,
            base_lane: 360.0,
            lane_step: 40.0,
            anchor_span_at_fork: true,
            palette: BRANCH_PALETTE.iter().map(|c| c.to_string()).collect(),
            commit_radius: 5.0,
            edge_stroke_width: 1.0,
            diagram_padding: 20.0,
            show_diagnostics: true,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.palette.is_empty() {
            anyhow::bail!("palette must contain at least one color");
        }
        for color in &self.palette {
            if !HEX_COLOR_RE.is_match(color) {
                anyhow::bail!("palette entry {color:?} is not a hex color");
            }
        }
        if !self.base_offset.is_finite() || !self.base_lane.is_finite() {
            anyhow::bail!("baseOffset and baseLane must be finite");
        }
        if !(self.commit_step >= MIN_STEP && self.commit_step.is_finite()) {
            anyhow::bail!(
                "commitStep must be at least {MIN_STEP}, got {}",
                self.commit_step
            );
        }
        if !(self.lane_step >= MIN_STEP && self.lane_step.is_finite()) {
            anyhow::bail!("laneStep must be at least {MIN_STEP}, got {}", self.lane_step);
        }
        if self.base_lane + self.lane_step == self.base_lane {
            anyhow::bail!(
                "laneStep {} vanishes next to baseLane {}",
                self.lane_step,
                self.base_lane
            );
        }
        if self.base_offset + self.commit_step == self.base_offset {
            anyhow::bail!(
                "commitStep {} vanishes next to baseOffset {}",
                self.commit_step,
                self.base_offset
            );
        }
        if self.root_branch.trim().is_empty() {
            anyhow::bail!("rootBranch must not be empty");
        }
        Ok(())
    }
}

/// PNG raster size. A missing side follows the diagram's aspect ratio; with
/// both missing the diagram's own size is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl RenderConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, side) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = side
                && !(v >= 1.0 && v.is_finite())
            {
                anyhow::bail!("render {name} must be at least 1, got {v}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    diagnostic_color: Option<String>,
    commit_stroke_width: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CommitGraphConfigFile {
    root_branch: Option<String>,
    base_offset: Option<f32>,
    commit_step: Option<f32>,
    base_lane: Option<f32>,
    lane_step: Option<f32>,
    anchor_span_at_fork: Option<bool>,
    palette: Option<Vec<String>>,
    commit_radius: Option<f32>,
    edge_stroke_width: Option<f32>,
    diagram_padding: Option<f32>,
    show_diagnostics: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    commit_graph: Option<CommitGraphConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => log::warn!("unknown theme {theme_name:?}, keeping classic"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.diagnostic_color {
            config.theme.diagnostic_color = v;
        }
        if let Some(v) = vars.commit_stroke_width {
            config.theme.commit_stroke_width = v;
        }
    }

    if let Some(cg) = parsed.commit_graph {
        if let Some(v) = cg.root_branch {
            config.layout.root_branch = v;
        }
        if let Some(v) = cg.base_offset {
            config.layout.base_offset = v;
        }
        if let Some(v) = cg.commit_step {
            config.layout.commit_step = v;
        }
        if let Some(v) = cg.base_lane {
            config.layout.base_lane = v;
        }
        if let Some(v) = cg.lane_step {
            config.layout.lane_step = v;
        }
        if let Some(v) = cg.anchor_span_at_fork {
            config.layout.anchor_span_at_fork = v;
        }
        if let Some(v) = cg.palette {
            config.layout.palette = v;
        }
        if let Some(v) = cg.commit_radius {
            config.layout.commit_radius = v;
        }
        if let Some(v) = cg.edge_stroke_width {
            config.layout.edge_stroke_width = v;
        }
        if let Some(v) = cg.diagram_padding {
            config.layout.diagram_padding = v;
        }
        if let Some(v) = cg.show_diagnostics {
            config.layout.show_diagnostics = v;
        }
    }

    if let Some(render) = parsed.render {
        if render.width.is_some() {
            config.render.width = render.width;
        }
        if render.height.is_some() {
            config.render.height = render.height;
        }
    }

    config.layout.validate()?;
    config.render.validate()?;

    Ok(config)
}
