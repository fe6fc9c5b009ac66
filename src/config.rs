//! Export configuration, read from `resume-pdf.toml`.
//!
//! Every field has a default, so an empty file (or no file at all) gives A4 pages
//! with 15mm margins, a single dynamic-height page, JPEG page images, a 3 MiB
//! size budget and a 150ms settle delay before capture.

use crate::error::{ExportError, Result};
use crate::layout::{PageGeometry, PageStrategy};
use crate::pdf::ImageFormat;
use crate::raster::RenderQuality;
use crate::units::{pagesize, Margins, Mm};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "resume-pdf.toml";

/// Complete configuration for resume-pdf.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default)]
    pub pdf: ExportConfig,
}

impl Configuration {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&contents).map_err(|e| {
            ExportError::InvalidConfig(format!("{}: {e}", path.as_ref().display()))
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ExportError::InvalidConfig(e.to_string()))
    }
}

/// PDF export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Single dynamic page or fixed pages
    #[serde(default)]
    pub strategy: PageStrategy,
    /// Compression used for page images
    #[serde(default)]
    pub image_format: ImageFormat,
    #[serde(default = "default_page_width")]
    pub page_width_mm: f32,
    #[serde(default = "default_page_height")]
    pub page_height_mm: f32,
    #[serde(default = "default_margin")]
    pub margin_top_mm: f32,
    #[serde(default = "default_margin")]
    pub margin_right_mm: f32,
    #[serde(default = "default_margin")]
    pub margin_bottom_mm: f32,
    #[serde(default = "default_margin")]
    pub margin_left_mm: f32,
    /// Maximum output size in bytes
    #[serde(default = "default_max_size")]
    pub max_size_bytes: u64,
    /// Pause between mounting the document and capturing it, in milliseconds
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Extra directory of fonts to make available to the renderer
    #[serde(default)]
    pub font_dir: Option<PathBuf>,
    /// Creator recorded in the PDF metadata, defaults to this tool
    #[serde(default)]
    pub creator: Option<String>,
    /// Settings for the first rasterization pass
    #[serde(default = "default_primary")]
    pub primary: RenderQuality,
    /// Settings for the regeneration pass when the first result is over budget
    #[serde(default = "default_reduced")]
    pub reduced: RenderQuality,
}

fn default_page_width() -> f32 {
    let (width, _) = pagesize::A4;
    width.0
}
fn default_page_height() -> f32 {
    let (_, height) = pagesize::A4;
    height.0
}
fn default_margin() -> f32 {
    15.0
}
fn default_primary() -> RenderQuality {
    RenderQuality {
        scale: 2.0,
        jpeg_quality: 95,
    }
}
fn default_reduced() -> RenderQuality {
    RenderQuality {
        scale: 1.5,
        jpeg_quality: 70,
    }
}
fn default_max_size() -> u64 {
    3 * 1024 * 1024
}
fn default_settle_delay() -> u64 {
    150
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            strategy: PageStrategy::default(),
            image_format: ImageFormat::default(),
            page_width_mm: default_page_width(),
            page_height_mm: default_page_height(),
            margin_top_mm: default_margin(),
            margin_right_mm: default_margin(),
            margin_bottom_mm: default_margin(),
            margin_left_mm: default_margin(),
            primary: default_primary(),
            reduced: default_reduced(),
            max_size_bytes: default_max_size(),
            settle_delay_ms: default_settle_delay(),
            font_dir: None,
            creator: None,
        }
    }
}

impl ExportConfig {
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            width: Mm(self.page_width_mm),
            height: Mm(self.page_height_mm),
            margins: Margins {
                top: Mm(self.margin_top_mm),
                right: Mm(self.margin_right_mm),
                bottom: Mm(self.margin_bottom_mm),
                left: Mm(self.margin_left_mm),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry().validate()?;

        for (name, quality) in [("primary", &self.primary), ("reduced", &self.reduced)] {
            if !(quality.scale > 0.0) {
                return Err(ExportError::InvalidConfig(format!(
                    "{name} scale must be positive, got {}",
                    quality.scale
                )));
            }
            if !(1..=100).contains(&quality.jpeg_quality) {
                return Err(ExportError::InvalidConfig(format!(
                    "{name} JPEG quality must be between 1 and 100, got {}",
                    quality.jpeg_quality
                )));
            }
        }
        if !self.reduced.is_below(&self.primary) {
            return Err(ExportError::InvalidConfig(
                "reduced scale and quality must both be lower than primary".to_string(),
            ));
        }
        if self.max_size_bytes == 0 {
            return Err(ExportError::InvalidConfig(
                "max size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_serialize_config() {
        let config = Configuration::default();
        let toml = config.to_toml().expect("can serialize config to TOML");
        let parsed: Configuration = toml::from_str(&toml).expect("can parse serialized config");
        assert_eq!(parsed.pdf, config.pdf);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let parsed: Configuration = toml::from_str("").expect("can parse empty config");
        assert_eq!(parsed.pdf, ExportConfig::default());
        assert_eq!(parsed.pdf.max_size_bytes, 3_145_728);
        assert_eq!(parsed.pdf.strategy, PageStrategy::Dynamic);
        assert!((100..=300).contains(&parsed.pdf.settle_delay_ms));
    }

    #[test]
    fn partial_files_keep_other_defaults() {
        let parsed: Configuration = toml::from_str(
            r#"
            [pdf]
            strategy = "paginated"
            image_format = "png"
            margin_top_mm = 20.0

            [pdf.reduced]
            scale = 1.0
            jpeg_quality = 60
            "#,
        )
        .expect("can parse partial config");
        assert_eq!(parsed.pdf.strategy, PageStrategy::Paginated);
        assert_eq!(parsed.pdf.image_format, ImageFormat::Png);
        assert_eq!(parsed.pdf.margin_top_mm, 20.0);
        assert_eq!(parsed.pdf.margin_left_mm, 15.0);
        assert_eq!(parsed.pdf.reduced.scale, 1.0);
        assert_eq!(parsed.pdf.primary, default_primary());
    }

    #[test]
    fn defaults_are_valid() {
        ExportConfig::default()
            .validate()
            .expect("default config is valid");
    }

    #[test]
    fn reduced_pass_must_be_strictly_lower() {
        let mut config = ExportConfig::default();
        config.reduced.jpeg_quality = config.primary.jpeg_quality;
        assert!(matches!(
            config.validate(),
            Err(ExportError::InvalidConfig(_))
        ));

        let mut config = ExportConfig::default();
        config.reduced.scale = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut config = ExportConfig::default();
        config.primary.jpeg_quality = 0;
        assert!(config.validate().is_err());

        let mut config = ExportConfig::default();
        config.max_size_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = ExportConfig::default();
        config.margin_left_mm = 200.0;
        assert!(config.validate().is_err());
    }
}
