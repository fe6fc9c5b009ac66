//! Interactive configuration wizard for creating `resume-pdf.toml`.
//!
//! The wizard asks for the page layout, image format, size budget and margins,
//! keeping the defaults for everything else.

use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use resume_pdf::{Configuration, ExportConfig, ImageFormat, PageStrategy, CONFIG_FILE};
use std::path::PathBuf;

const STRATEGIES: [PageStrategy; 2] = [PageStrategy::Dynamic, PageStrategy::Paginated];
const FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

/// Run the interactive configuration wizard and write `resume-pdf.toml` to the
/// current directory.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme::default();
    let defaults = ExportConfig::default();

    let strategy = FuzzySelect::with_theme(&theme)
        .with_prompt("Page layout")
        .items(&[
            "dynamic (one page as tall as the resume)",
            "paginated (split across fixed-size pages)",
        ])
        .default(0)
        .interact()?;
    let strategy = STRATEGIES[strategy];

    let image_format = FuzzySelect::with_theme(&theme)
        .with_prompt("Page image format")
        .items(&["jpeg (smaller files)", "png (lossless)"])
        .default(0)
        .interact()?;
    let image_format = FORMATS[image_format];

    let max_size: String = Input::with_theme(&theme)
        .with_prompt("Maximum PDF size")
        .default("3 MiB".to_string())
        .validate_with(|input: &String| {
            byte_unit::Byte::parse_str(input, true)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    let max_size_bytes = byte_unit::Byte::parse_str(&max_size, true)
        .map_err(|e| anyhow!("Invalid size '{max_size}': {e}"))?
        .as_u64();

    let margin: f32 = Input::with_theme(&theme)
        .with_prompt("Page margins in millimetres")
        .default(defaults.margin_top_mm)
        .interact_text()?;

    let pdf = ExportConfig {
        strategy,
        image_format,
        max_size_bytes,
        margin_top_mm: margin,
        margin_right_mm: margin,
        margin_bottom_mm: margin,
        margin_left_mm: margin,
        ..defaults
    };
    pdf.validate()
        .with_context(|| "The chosen settings don't fit on the page")?;

    let config = Configuration { pdf };
    let config = toml::to_string_pretty(&config)
        .with_context(|| "Failed to convert configuration to TOML")?;

    let config_path = PathBuf::from(CONFIG_FILE);
    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!("{CONFIG_FILE} already exists, do you want to override it?"))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", config);
    } else {
        std::fs::write(&config_path, config)
            .with_context(|| "Failed to write configuration file")?;
        println!("{CONFIG_FILE} written!");
    }

    Ok(())
}
