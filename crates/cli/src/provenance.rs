use anyhow::{Context, Result};
use cropframe::geom2::{Boundary, Normalization};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What went into a generated pipeline artifact.
pub struct Payload {
    pub boundary: Vec<[f64; 2]>,
    pub angle: f64,
    pub params: Value,
}

impl Payload {
    pub fn new(boundary: &Boundary, norm: &Normalization, params: Value) -> Self {
        Self {
            boundary: boundary.to_pairs(),
            angle: norm.angle,
            params,
        }
    }
}

/// Write `<artifact stem>.provenance.json` next to the artifact with the git
/// commit, callsite, input boundary, solved angle, params and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "crate_version": cropframe::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "boundary": payload.boundary,
        "angle_rad": payload.angle,
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
