use commit_graph_renderer::{RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitGraphRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    root_branch: Option<String>,
    show_diagnostics: Option<bool>,
}

fn build_render_options(options: CommitGraphRenderOptions) -> RenderOptions {
    let mut render_options = match options.theme.as_deref() {
        Some("midnight") | Some("dark") => RenderOptions::midnight(),
        _ => RenderOptions::classic(),
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(root_branch) = options.root_branch {
        render_options.layout.root_branch = root_branch;
    }
    if let Some(show) = options.show_diagnostics {
        render_options.layout.show_diagnostics = show;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_commit_graph_svg(
    snapshot_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<CommitGraphRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        CommitGraphRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(snapshot_json, render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use commit_graph_renderer::render_with_options;

    use crate::{CommitGraphRenderOptions, build_render_options};

    #[test]
    fn renders_branch_and_merge() {
        let snapshot = r#"{
            "branches": [{"name": "main"}, {"name": "topic"}],
            "commits": [
                {"sha": "a", "parents": [], "children": ["b", "t"], "branch": "main"},
                {"sha": "b", "parents": ["a"], "children": ["m"], "branch": "main"},
                {"sha": "t", "parents": ["a"], "children": ["m"], "branch": "topic"},
                {"sha": "m", "parents": ["b", "t"], "children": [], "branch": "main"}
            ]
        }"#;
        let options: CommitGraphRenderOptions =
            serde_json::from_str(r#"{"theme": "midnight", "rootBranch": "main"}"#).unwrap();

        let svg = render_with_options(snapshot, build_render_options(options))
            .expect("branch and merge should render");

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("data-sha=\"m\""));
        assert!(!svg.contains("class=\"diagnostics\""));
    }

    #[test]
    fn unknown_theme_falls_back_to_classic() {
        let options = build_render_options(CommitGraphRenderOptions {
            theme: Some("sepia".to_string()),
            ..Default::default()
        });
        assert_eq!(
            options.theme.background,
            commit_graph_renderer::Theme::classic().background
        );
    }
}
