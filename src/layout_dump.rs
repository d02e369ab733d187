use crate::layout::{EdgeKind, LayoutError, LayoutPass};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub commits: Vec<CommitDump>,
    pub edges: Vec<EdgeDump>,
    pub branches: Vec<BranchDump>,
    pub errors: Vec<ErrorDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDump {
    pub sha: String,
    pub branch: String,
    pub author: String,
    pub message: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub from_sha: String,
    pub to_sha: String,
    pub kind: EdgeKind,
    pub color: Option<String>,
    pub d: String,
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDump {
    pub name: String,
    pub lane: Option<f32>,
    pub color: Option<String>,
    pub start: Option<f32>,
    pub end: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDump {
    pub message: String,
    pub detail: LayoutError,
}

impl LayoutDump {
    pub fn from_pass(pass: &LayoutPass) -> Self {
        let commits = pass
            .commits
            .iter()
            .map(|commit| CommitDump {
                sha: commit.sha.clone(),
                branch: commit.branch.clone(),
                author: commit.author.clone(),
                message: commit.message.clone(),
                x: commit.x,
                y: commit.y,
                color: commit.color.clone(),
            })
            .collect();

        let edges = pass
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from_sha: edge.from_sha.clone(),
                to_sha: edge.to_sha.clone(),
                kind: edge.kind,
                color: edge.color.clone(),
                d: edge.path.svg_d(),
                points: edge.path.points().iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect();

        let branches = pass
            .branches
            .iter()
            .map(|branch| BranchDump {
                name: branch.name.clone(),
                lane: branch.lane,
                color: branch.color.clone(),
                start: branch.start,
                end: branch.end,
            })
            .collect();

        let errors = pass
            .errors
            .iter()
            .map(|err| ErrorDump {
                message: err.to_string(),
                detail: err.clone(),
            })
            .collect();

        LayoutDump {
            width: pass.width,
            height: pass.height,
            commits,
            edges,
            branches,
            errors,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_layout_dump(path: &Path, pass: &LayoutPass) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_pass(pass);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
