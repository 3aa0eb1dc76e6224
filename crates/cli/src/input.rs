//! Boundary and pipeline-parameter loading.
//!
//! Boundaries come from CSV or Parquet (columns `x`, `y`, read with polars)
//! or JSON (`[[x, y], ...]`), chosen by file extension.

use anyhow::{bail, Context, Result};
use cropframe::geom2::Boundary;
use cropframe::params::PipelineParams;
use polars::prelude::*;
use std::path::Path;

pub fn load_boundary(path: &Path) -> Result<Boundary> {
    let pairs = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            let lf = LazyCsvReader::new(path)
                .with_infer_schema_length(Some(100))
                .finish()?;
            frame_pairs(lf, path)?
        }
        Some("parquet") => {
            frame_pairs(LazyFrame::scan_parquet(path, ScanArgsParquet::default())?, path)?
        }
        Some("json") => read_json_pairs(path)?,
        _ => bail!(
            "unsupported boundary file {} (expected .csv, .parquet or .json)",
            path.display()
        ),
    };
    let boundary = Boundary::from_pairs(pairs)
        .with_context(|| format!("validating boundary from {}", path.display()))?;
    tracing::info!(points = boundary.len(), path = %path.display(), "boundary_loaded");
    Ok(boundary)
}

fn frame_pairs(lf: LazyFrame, path: &Path) -> Result<Vec<[f64; 2]>> {
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns from {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, pair)| match pair {
            (Some(x), Some(y)) => Ok([x, y]),
            _ => bail!("{}: row {row} has a missing coordinate", path.display()),
        })
        .collect()
}

fn read_json_pairs(path: &Path) -> Result<Vec<[f64; 2]>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing {} as [[x, y], ...]", path.display()))
}

/// Pipeline thresholds from an optional JSON file; missing fields keep defaults.
pub fn load_pipeline(path: Option<&Path>) -> Result<PipelineParams> {
    let Some(path) = path else {
        return Ok(PipelineParams::default());
    };
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing pipeline parameters from {}", path.display()))
}
