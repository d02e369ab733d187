use crate::config::{LayoutConfig, RenderConfig};
use crate::layout::{EdgePath, LayoutPass};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const FALLBACK_STROKE: &str = "#839192";

pub fn render_svg(pass: &LayoutPass, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let diagnostics: Vec<String> = if config.show_diagnostics {
        pass.errors.iter().map(|err| err.to_string()).collect()
    } else {
        Vec::new()
    };
    let line_height = theme.font_size * 1.4;
    let overlay_height = diagnostics.len() as f32 * line_height;
    let width = pass.width.max(200.0);
    let height = (pass.height + overlay_height).max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    svg.push_str("<g class=\"edges\">");
    for edge in &pass.edges {
        let stroke = escape_xml(edge.color.as_deref().unwrap_or(FALLBACK_STROKE));
        match &edge.path {
            EdgePath::Line { from, to } => {
                svg.push_str(&format!(
                    "<line class=\"line\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    from.x, from.y, to.x, to.y, stroke, config.edge_stroke_width
                ));
            }
            EdgePath::Curve { .. } => {
                svg.push_str(&format!(
                    "<path class=\"line\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    edge.path.svg_d(),
                    stroke,
                    config.edge_stroke_width
                ));
            }
        }
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"commit\">");
    for commit in &pass.commits {
        let Some(point) = commit.position() else {
            continue;
        };
        let color = escape_xml(commit.color.as_deref().unwrap_or(FALLBACK_STROKE));
        svg.push_str(&format!(
            "<circle data-sha=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{color}\" stroke=\"{color}\" stroke-width=\"{}\"/>",
            escape_xml(&commit.sha),
            point.x,
            point.y,
            config.commit_radius,
            theme.commit_stroke_width
        ));
    }
    svg.push_str("</g>");

    if !diagnostics.is_empty() {
        let font_family = escape_xml(&theme.font_family);
        let fill = escape_xml(&theme.diagnostic_color);
        svg.push_str("<g class=\"diagnostics\">");
        for (idx, message) in diagnostics.iter().enumerate() {
            let y = pass.height + (idx as f32 + 1.0) * line_height;
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                config.diagram_padding,
                font_family,
                theme.font_size,
                fill,
                escape_xml(message)
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

/// Pixel size of the raster for a diagram of `natural` size. A missing side
/// keeps the diagram's aspect ratio.
pub fn raster_size(natural: (f32, f32), render_cfg: &RenderConfig) -> (u32, u32) {
    let (nat_w, nat_h) = (natural.0.max(1.0), natural.1.max(1.0));
    let (w, h) = match (render_cfg.width, render_cfg.height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, nat_h * w / nat_w),
        (None, Some(h)) => (nat_w * h / nat_h, h),
        (None, None) => (nat_w, nat_h),
    };
    (w.round().max(1.0) as u32, h.round().max(1.0) as u32)
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let natural = (tree.size().width(), tree.size().height());
    let (width, height) = raster_size(natural, render_cfg);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate {width}x{height} pixmap"))?;

    let transform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / natural.0,
        height as f32 / natural.1,
    );
    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, transform, &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
