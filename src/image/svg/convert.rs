//! SVG to PNG conversion.
//!
//! Two backends implement [`Rasterizer`]:
//!
//! - [`BuiltinRasterizer`]: `usvg` parse + `resvg` render, in process
//! - [`MagickRasterizer`]: shells out to ImageMagick's `magick`

use anyhow::{Context, Result, bail};
use resvg::tiny_skia;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Backend;
use crate::manifest::Sizing;
use crate::utils::exec::{Cmd, FilterRule};

/// Density ImageMagick assumes for an unscaled SVG.
const BASE_DPI: f64 = 96.0;

/// Renders one SVG file into one PNG file.
///
/// Implementations must be shareable across the drain worker pool.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, source: &Path, target: &Path, sizing: Sizing) -> Result<()>;
}

/// Build the rasterizer for a configured backend.
pub fn rasterizer_for(backend: Backend) -> Result<Box<dyn Rasterizer>> {
    Ok(match backend {
        Backend::Builtin => Box::new(BuiltinRasterizer::new()),
        Backend::Magick => Box::new(MagickRasterizer::new()?),
    })
}

// ============================================================================
// Builtin (resvg)
// ============================================================================

/// In-process renderer. System fonts are loaded once and shared.
pub struct BuiltinRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl BuiltinRasterizer {
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        Self {
            fontdb: Arc::new(fontdb),
        }
    }
}

impl Default for BuiltinRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for BuiltinRasterizer {
    fn rasterize(&self, source: &Path, target: &Path, sizing: Sizing) -> Result<()> {
        let svg_data =
            fs::read(source).with_context(|| format!("Failed to read {}", source.display()))?;

        let options = usvg::Options {
            resources_dir: source.parent().map(Path::to_path_buf),
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(&svg_data, &options)
            .with_context(|| format!("Failed to parse SVG {}", source.display()))?;

        let size = tree.size();
        let output = OutputSize::compute((size.width(), size.height()), sizing)?;

        let mut pixmap = tiny_skia::Pixmap::new(output.width, output.height).with_context(|| {
            format!("Failed to allocate {}x{} pixmap", output.width, output.height)
        })?;
        let transform = tiny_skia::Transform::from_scale(output.scale_x, output.scale_y);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let png = pixmap.encode_png().context("Failed to encode PNG")?;
        write_output(target, &png)
    }
}

/// Pixel dimensions and render transform for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OutputSize {
    width: u32,
    height: u32,
    scale_x: f32,
    scale_y: f32,
}

impl OutputSize {
    /// Scale mode rounds up so content is never clipped; dimension mode
    /// stretches the drawing to exactly the requested box.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn compute(intrinsic: (f32, f32), sizing: Sizing) -> Result<Self> {
        let (svg_w, svg_h) = intrinsic;
        let size = match sizing {
            Sizing::Scale(scale) => {
                let scale = scale as f32;
                Self {
                    width: (svg_w * scale).ceil() as u32,
                    height: (svg_h * scale).ceil() as u32,
                    scale_x: scale,
                    scale_y: scale,
                }
            }
            Sizing::Dimensions { width, height } => {
                let w = width.round() as u32;
                let h = height.round() as u32;
                Self {
                    width: w,
                    height: h,
                    scale_x: w as f32 / svg_w,
                    scale_y: h as f32 / svg_h,
                }
            }
        };

        if size.width == 0 || size.height == 0 {
            bail!("Invalid output size {}x{} for {}", size.width, size.height, sizing);
        }
        Ok(size)
    }
}

// ============================================================================
// ImageMagick
// ============================================================================

/// Known ImageMagick noise on stderr.
static MAGICK_FILTER: FilterRule =
    FilterRule::new(&["WARNING: ", "magick: delegate library support not built-in"]);

/// Converts through the `magick` binary found on `PATH`.
pub struct MagickRasterizer {
    program: PathBuf,
}

impl MagickRasterizer {
    pub fn new() -> Result<Self> {
        let program = which::which("magick")
            .context("ImageMagick `magick` not found in PATH (set convert.backend = \"builtin\")")?;
        Ok(Self { program })
    }

    fn command(&self, source: &Path, target: &Path, sizing: Sizing) -> Cmd {
        let cmd = Cmd::new(&self.program).args(["-background", "none"]);
        match sizing {
            Sizing::Scale(scale) => cmd
                .arg("-density")
                .arg(format!("{}", BASE_DPI * scale))
                .arg(source)
                .arg(target),
            Sizing::Dimensions { width, height } => cmd
                .arg(source)
                .arg("-resize")
                .arg(format!("{}x{}!", width.round(), height.round()))
                .arg(target),
        }
    }
}

impl Rasterizer for MagickRasterizer {
    fn rasterize(&self, source: &Path, target: &Path, sizing: Sizing) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        self.command(source, target, sizing)
            .filter(&MAGICK_FILTER)
            .run()
            .context("ImageMagick conversion failed")?;
        Ok(())
    }
}

fn write_output(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(target, data).with_context(|| format!("Failed to write {}", target.display()))
}
