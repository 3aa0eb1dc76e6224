use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cropframe::format::{matrix_tokens, polygon_wkt};
use cropframe::geom2::Normalization;
use cropframe::params::{PdalParams, TransformationParameters};
use cropframe::render::{Renderer, DEFAULT_OUTPUT, DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_DIR};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Generate point-cloud pipeline configs for rotated crop regions")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Render the pipeline template for a boundary and write it atomically
    Generate {
        /// Boundary corners (.csv or .parquet with x,y columns, or .json [[x, y], ...])
        #[arg(long)]
        points: PathBuf,
        #[arg(long, default_value = DEFAULT_TEMPLATE_DIR)]
        template_dir: PathBuf,
        #[arg(long, default_value = DEFAULT_TEMPLATE)]
        template: String,
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
        /// Optional JSON file overriding slope/window/threshold/scalar
        #[arg(long)]
        pipeline: Option<PathBuf>,
        /// Skip the provenance sidecar
        #[arg(long)]
        no_provenance: bool,
    },
    /// Print corners, angle, matrices and polygon for a boundary as JSON
    Inspect {
        #[arg(long)]
        points: PathBuf,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            points,
            template_dir,
            template,
            out,
            pipeline,
            no_provenance,
        } => generate(points, template_dir, template, out, pipeline, !no_provenance),
        Action::Inspect { points } => inspect(points),
    }
}

fn generate(
    points: PathBuf,
    template_dir: PathBuf,
    template: String,
    out: PathBuf,
    pipeline: Option<PathBuf>,
    sidecar: bool,
) -> Result<()> {
    tracing::info!(
        points = %points.display(),
        template_dir = %template_dir.display(),
        template,
        out = %out.display(),
        "generate"
    );
    let boundary = input::load_boundary(&points)?;
    let pipeline = input::load_pipeline(pipeline.as_deref())?;
    let norm = Normalization::derive(boundary.points())
        .with_context(|| format!("normalizing boundary from {}", points.display()))?;
    tracing::info!(angle_rad = norm.angle, angle_deg = norm.angle.to_degrees(), "solved");

    let geometry = TransformationParameters::from_normalization(&boundary, &norm)?;
    let params = PdalParams::new(pipeline, &geometry);
    let renderer = Renderer::from_dir(&template_dir, template);
    renderer
        .write(&params, &out)
        .with_context(|| format!("rendering {}", renderer.template_name()))?;

    if sidecar {
        let payload = provenance::Payload::new(&boundary, &norm, serde_json::to_value(&params)?);
        let prov = provenance::write_sidecar(&out, payload)?;
        tracing::info!(provenance = %prov.display(), "sidecar");
    }
    Ok(())
}

#[derive(Serialize)]
struct Inspection {
    lower_left: [f64; 2],
    lower_right: [f64; 2],
    angle_rad: f64,
    angle_deg: f64,
    rotation: String,
    translation: String,
    normalization: String,
    polygon: String,
}

fn inspect(points: PathBuf) -> Result<()> {
    tracing::info!(points = %points.display(), "inspect");
    let boundary = input::load_boundary(&points)?;
    let norm = Normalization::derive(boundary.points())?;
    let ll = norm.corners.lower_left;
    let lr = norm.corners.lower_right;
    let obj = Inspection {
        lower_left: [ll.x, ll.y],
        lower_right: [lr.x, lr.y],
        angle_rad: norm.angle,
        angle_deg: norm.angle.to_degrees(),
        rotation: matrix_tokens(Some(&norm.rotation4())),
        translation: matrix_tokens(Some(&norm.translation4())),
        normalization: matrix_tokens(Some(&norm.combined4())),
        polygon: polygon_wkt(boundary.points())?,
    };
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
