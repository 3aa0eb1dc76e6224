//! Template rendering and artifact writes.
//!
//! Templates are Jinja-style (minijinja) with `trim_blocks` on, looked up by
//! name in a template directory. The rendered text is fully materialized in
//! memory before anything touches the output path, and the write itself goes
//! through a temp file plus rename, so a failed render or write leaves no
//! partial artifact behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use atomicwrites::{AtomicFile, OverwriteBehavior};
use minijinja::Environment;
use thiserror::Error;

use crate::error::GeomError;
use crate::geom2::Boundary;
use crate::params::{PdalParams, PipelineParams};

pub const DEFAULT_TEMPLATE_DIR: &str = "templates";
pub const DEFAULT_TEMPLATE: &str = "sfm_cloudprocess.template";
pub const DEFAULT_OUTPUT: &str = "sfm_cloudprocess.json";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Geometry(#[from] GeomError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A template environment bound to one template name.
pub struct Renderer {
    env: Environment<'static>,
    template: String,
}

fn base_env() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env
}

impl Renderer {
    /// Resolve `template` inside `dir` lazily, at render time.
    pub fn from_dir(dir: impl AsRef<Path>, template: impl Into<String>) -> Self {
        let mut env = base_env();
        env.set_loader(minijinja::path_loader(dir.as_ref()));
        Self {
            env,
            template: template.into(),
        }
    }

    /// Register template source directly under `name`.
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Result<Self, RenderError> {
        let template = name.into();
        let mut env = base_env();
        env.add_template_owned(template.clone(), source.into())?;
        Ok(Self { env, template })
    }

    pub fn template_name(&self) -> &str {
        &self.template
    }

    pub fn render(&self, params: &PdalParams) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(&self.template)?;
        Ok(tmpl.render(params)?)
    }

    /// Render, then write atomically to `out` with a trailing newline.
    pub fn write(&self, params: &PdalParams, out: &Path) -> Result<(), RenderError> {
        let mut text = self.render(params)?;
        text.push('\n');
        write_atomic(out, text.as_bytes())?;
        tracing::info!(out = %out.display(), bytes = text.len(), template = %self.template, "wrote");
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), RenderError> {
    let wrap = |source: std::io::Error| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
    }
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| {
            f.write_all(contents)?;
            f.flush()
        })
        .map_err(|err| match err {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => wrap(e),
        })
}

/// Derive parameters for `boundary`, render and write them to `out`.
pub fn write_config(
    renderer: &Renderer,
    boundary: &Boundary,
    pipeline: PipelineParams,
    out: &Path,
) -> Result<PdalParams, RenderError> {
    let params = PdalParams::from_boundary(boundary, pipeline)?;
    renderer.write(&params, out)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TEMPLATE: &str = "\
{% if matrix.transformation != \"None\" %}
rot={{ matrix.transformation }}
{% endif %}
crop={{ crop.polygon }}
slope={{ pipeline.slope }} window={{ pipeline.window }}";

    fn plot() -> Boundary {
        Boundary::from_pairs([
            [262986.2, 53128.25],
            [262967.5, 53029.84],
            [262870.1, 53048.72],
            [262888.9, 53148.19],
        ])
        .unwrap()
    }

    #[test]
    fn renders_bundle_with_trim_blocks() {
        let r = Renderer::from_source("t", TEMPLATE).unwrap();
        let p = PdalParams::from_boundary(&plot(), PipelineParams::default()).unwrap();
        let text = r.render(&p).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3, "{text}");
        assert!(lines[0].starts_with("rot="));
        assert_eq!(lines[1], format!("crop={}", p.crop.polygon));
        assert_eq!(lines[2], "slope=0.08 window=15");
    }

    #[test]
    fn write_loads_from_dir_and_appends_newline() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_TEMPLATE), "{{ crop.polygon }}").unwrap();
        let out = dir.path().join("nested").join(DEFAULT_OUTPUT);
        let r = Renderer::from_dir(dir.path(), DEFAULT_TEMPLATE);
        let p = write_config(&r, &plot(), PipelineParams::default(), &out).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written, format!("{}\n", p.crop.polygon));
    }

    #[test]
    fn failed_render_leaves_no_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.json");
        let missing = Renderer::from_dir(dir.path(), "absent.template");
        let err = write_config(&missing, &plot(), PipelineParams::default(), &out).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
        assert!(!out.exists());

        let broken = Renderer::from_source("b", "{{ crop.polygon | no_such_filter }}").unwrap();
        let err = write_config(&broken, &plot(), PipelineParams::default(), &out).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
        assert!(!out.exists());
    }

    #[test]
    fn geometry_failure_aborts_before_write() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.json");
        let square = Boundary::from_pairs([[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]).unwrap();
        let r = Renderer::from_source("t", TEMPLATE).unwrap();
        let err = write_config(&r, &square, PipelineParams::default(), &out).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Geometry(GeomError::DegenerateGeometry(_))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn overwrite_replaces_previous_artifact() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.txt");
        fs::write(&out, "stale contents that are longer than the new ones").unwrap();
        let r = Renderer::from_source("t", "ok").unwrap();
        let p = PdalParams::from_boundary(&plot(), PipelineParams::default()).unwrap();
        r.write(&p, &out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "ok\n");
    }
}
