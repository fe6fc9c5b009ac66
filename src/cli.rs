use clap::{Args, Parser, Subcommand};
use resume_pdf::{ImageFormat, PageStrategy};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a resume-pdf.toml config file
    Config,
    /// Renders a resume JSON file to PDF
    Render(RenderArgs),
    /// Writes an example resume JSON file to start from
    Sample {
        /// Where to write the example resume
        #[clap(short, long, default_value = "resume.json")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Resume data, as JSON
    pub resume: PathBuf,

    /// Directory the PDF is saved into
    #[clap(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Configuration file to use instead of ./resume-pdf.toml
    #[clap(short, long, env = "RESUME_PDF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Page layout, overriding the configuration file
    #[clap(short, long, value_enum)]
    pub strategy: Option<PageStrategy>,

    /// Page image compression, overriding the configuration file
    #[clap(short, long, value_enum)]
    pub format: Option<ImageFormat>,

    /// Size budget such as "3 MiB" or "2500000", overriding the configuration file
    #[clap(long, value_parser = parse_size)]
    pub max_size: Option<u64>,
}

fn parse_size(value: &str) -> Result<u64, String> {
    byte_unit::Byte::parse_str(value, true)
        .map(|b| b.as_u64())
        .map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
