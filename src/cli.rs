use crate::config::{Config, load_config};
use crate::ir::parse_snapshot;
use crate::layout::{LayoutPass, compute_layout};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::model::CommitModel;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::stats::analyze_repo;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cgr", version, about = "Commit graph layout and renderer")]
pub struct Args {
    /// Repository snapshot (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, commitGraph, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Raster width for PNG output
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Raster height for PNG output
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Branch pinned to the base lane
    #[arg(long = "root")]
    pub root: Option<String>,

    /// Print commit counts per branch and author instead of rendering
    #[arg(long = "stats")]
    pub stats: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    config.render.validate()?;

    let input = read_input(args.input.as_deref())?;
    let snapshot = parse_snapshot(&input)?;
    let model = CommitModel::from_snapshot(snapshot)?;

    if args.stats {
        let stats = analyze_repo(&model);
        let json = serde_json::to_string_pretty(&stats)?;
        return write_text(&json, args.output.as_deref());
    }

    let pass = compute_layout(&model, &config.layout);
    report_pass(&pass);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&pass, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&pass, &config.theme, &config.layout);
            write_output_png(&svg, &output, &config.render)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &pass)?,
            None => println!("{}", LayoutDump::from_pass(&pass).to_json()?),
        },
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if args.width.is_some() {
        config.render.width = args.width;
    }
    if args.height.is_some() {
        config.render.height = args.height;
    }
    if let Some(root) = &args.root {
        config.layout.root_branch = root.clone();
    }
}

fn report_pass(pass: &LayoutPass) {
    log::info!(
        "laid out {} commits on {} branches with {} edges",
        pass.commits.len(),
        pass.branches.len(),
        pass.edges.len()
    );
    if !pass.is_clean() {
        log::warn!(
            "{} layout problems; rendering what could be placed",
            pass.errors.len()
        );
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
