//! Resume to PDF export.
//!
//! An export runs as a single task: generate markup, mount it in a
//! [`RenderSandbox`], rasterize, lay the canvas out on pages and serialize. If the
//! serialized document is larger than the configured budget the whole capture is
//! repeated once at the reduced scale and JPEG quality, and that second result is
//! accepted whatever its size. Nothing is retried beyond that.
//!
//! Exports are single-flight: while one is running on an [`Exporter`], a second
//! call fails fast with [`ExportError::Busy`] instead of competing for the same
//! output. The in-progress flag is released on every exit path.
//!
//! Files are written to a temporary file in the target directory and renamed into
//! place, so a failed export never leaves a partial PDF behind.

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::layout;
use crate::markup::{MarkupGenerator, SvgMarkup};
use crate::notify::{Notifier, Severity};
use crate::pdf::{Encoding, Info, PdfDocument};
use crate::raster::{Rasterizer, RenderQuality, SvgRasterizer};
use crate::resume::{ResumeData, PLACEHOLDER_NAME};
use crate::sandbox::RenderSandbox;
use byte_unit::{Byte, Unit};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tempfile::NamedTempFile;

/// What one rasterize-layout-serialize pass produced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PassReport {
    pub quality: RenderQuality,
    pub size: usize,
    pub page_count: usize,
}

/// A serialized PDF held in memory.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub page_count: usize,
    /// One entry per pass, in order; the last one produced `bytes`.
    pub passes: Vec<PassReport>,
    /// Still larger than the budget after regenerating.
    pub over_budget: bool,
}

impl RenderedPdf {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the size budget forced a second pass.
    pub fn regenerated(&self) -> bool {
        self.passes.len() > 1
    }
}

/// A PDF saved to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub size: usize,
    pub page_count: usize,
    pub passes: usize,
}

/// Size in MiB, as reported to the user.
pub fn size_in_mb(bytes: usize) -> f64 {
    Byte::from_u64(bytes as u64)
        .get_adjusted_unit(Unit::MiB)
        .get_value()
}

/// Clears the in-progress flag when an export ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Exporter<R = SvgRasterizer, M = SvgMarkup> {
    config: ExportConfig,
    rasterizer: R,
    markup: M,
    busy: AtomicBool,
}

impl Exporter {
    /// An exporter using the bundled SVG layout and resvg rasterizer.
    pub fn new(config: ExportConfig) -> Result<Exporter> {
        let rasterizer = SvgRasterizer::new(config.font_dir.clone());
        Exporter::with_collaborators(config, rasterizer, SvgMarkup::default())
    }
}

impl<R: Rasterizer, M: MarkupGenerator> Exporter<R, M> {
    pub fn with_collaborators(config: ExportConfig, rasterizer: R, markup: M) -> Result<Self> {
        config.validate()?;
        Ok(Exporter {
            config,
            rasterizer,
            markup,
            busy: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlight<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::Busy)?;
        Ok(InFlight(&self.busy))
    }

    /// Renders `resume` to PDF bytes without touching the filesystem.
    pub fn render(&self, resume: &ResumeData) -> Result<RenderedPdf> {
        let _in_flight = self.begin()?;
        self.render_in_flight(resume)
    }

    /// Renders `resume` and saves it into `out_dir`, reporting progress to `notifier`.
    pub fn export(
        &self,
        resume: &ResumeData,
        out_dir: &Path,
        notifier: &dyn Notifier,
    ) -> Result<ExportOutcome> {
        notifier.notify("Generating PDF...", Severity::Info);

        match self.try_export(resume, out_dir) {
            Ok(outcome) => {
                notifier.notify(
                    &format!(
                        "PDF downloaded successfully! ({:.2}MB)",
                        size_in_mb(outcome.size)
                    ),
                    Severity::Success,
                );
                Ok(outcome)
            }
            Err(e) => {
                log::error!("Failed to generate PDF: {e}");
                notifier.notify(&e.user_message(), Severity::Error);
                Err(e)
            }
        }
    }

    fn try_export(&self, resume: &ResumeData, out_dir: &Path) -> Result<ExportOutcome> {
        let _in_flight = self.begin()?;
        let rendered = self.render_in_flight(resume)?;
        let path = save(out_dir, &rendered.file_name, &rendered.bytes)?;
        log::info!("saved {} ({} bytes)", path.display(), rendered.size());

        Ok(ExportOutcome {
            path,
            size: rendered.size(),
            page_count: rendered.page_count,
            passes: rendered.passes.len(),
        })
    }

    fn render_in_flight(&self, resume: &ResumeData) -> Result<RenderedPdf> {
        let sandbox = RenderSandbox::mount(self.markup.generate(resume))?;
        if self.config.settle_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.settle_delay_ms));
        }

        let name = resume.display_name();
        let info = Info {
            title: Some(format!("{name} - Resume")),
            author: (name != PLACEHOLDER_NAME).then_some(name),
            creator: Some(self.config.creator.clone().unwrap_or_else(|| {
                concat!("resume-pdf v", env!("CARGO_PKG_VERSION")).to_string()
            })),
        };

        let max_size = self.config.max_size_bytes;
        let (bytes, first) = self.render_pass(&sandbox, &info, self.config.primary)?;
        let mut passes = vec![first];
        let bytes = if bytes.len() as u64 <= max_size {
            bytes
        } else {
            log::warn!(
                "PDF is {} bytes, over the {max_size} byte budget; regenerating at scale {} quality {}",
                bytes.len(),
                self.config.reduced.scale,
                self.config.reduced.jpeg_quality
            );
            let (bytes, second) = self.render_pass(&sandbox, &info, self.config.reduced)?;
            if bytes.len() as u64 > max_size {
                log::warn!(
                    "regenerated PDF is still {} bytes; keeping it anyway",
                    bytes.len()
                );
            }
            passes.push(second);
            bytes
        };

        let page_count = passes.last().map(|p| p.page_count).unwrap_or_default();
        Ok(RenderedPdf {
            over_budget: bytes.len() as u64 > max_size,
            bytes,
            file_name: resume.file_name(),
            page_count,
            passes,
        })
    }

    fn render_pass(
        &self,
        sandbox: &RenderSandbox,
        info: &Info,
        quality: RenderQuality,
    ) -> Result<(Vec<u8>, PassReport)> {
        let canvas = self.rasterizer.rasterize(sandbox, quality)?;
        log::debug!(
            "captured {}x{}px canvas ({:.1}x{:.1}mm) at scale {}",
            canvas.width(),
            canvas.height(),
            canvas.width_mm().0,
            canvas.height_mm().0,
            canvas.scale
        );

        let encoding = Encoding {
            format: self.config.image_format,
            jpeg_quality: quality.jpeg_quality,
        };
        let pages = layout::lay_out(
            self.config.strategy,
            &canvas,
            &self.config.geometry(),
            encoding,
        )?;

        let mut document = PdfDocument::new(info.clone());
        for page in pages {
            document.add_page(page);
        }
        let page_count = document.page_count();
        let bytes = document.write()?;

        let report = PassReport {
            quality,
            size: bytes.len(),
            page_count,
        };
        log::debug!("pass at scale {} produced {:?}", quality.scale, report);
        Ok((bytes, report))
    }
}

fn save(out_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(file_name);

    let mut file = NamedTempFile::new_in(out_dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(&path).map_err(|e| e.error)?;

    Ok(path)
}
