//! pdfslides CLI - PDF to PowerPoint conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfslides::{
    convert_with, format_file_size, ConversionSettings, FitMode, ImageFormat, PdfiumRenderer,
    Quality, SlideSize,
};

#[derive(Parser)]
#[command(name = "pdfslides")]
#[command(version)]
#[command(about = "Convert PDF documents to PowerPoint presentations", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output .pptx file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF to a PowerPoint presentation
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output .pptx file (input name with .pptx extension if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Slide size preset
        #[arg(long, value_enum)]
        size: Option<SizeArg>,

        /// How the page image is placed on the slide
        #[arg(long, value_enum)]
        fit: Option<FitArg>,

        /// Render quality tier (1-3)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=3))]
        quality: Option<u8>,

        /// Page range (e.g. "all", "5", "2-9", "4-")
        #[arg(long)]
        pages: Option<String>,

        /// Overlay extracted text on each slide
        #[arg(long)]
        text: bool,

        /// Encode page images as JPEG instead of PNG
        #[arg(long)]
        jpeg: bool,

        /// Load settings from a JSON file (flags override it)
        #[arg(long, value_name = "FILE", env = "PDFSLIDES_SETTINGS")]
        settings: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SizeArg {
    /// 16:9 widescreen
    #[value(name = "16:9")]
    Widescreen,
    /// 4:3 standard
    #[value(name = "4:3")]
    Standard,
    /// A4 paper
    A4,
    /// US Letter
    Letter,
}

impl From<SizeArg> for SlideSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Widescreen => SlideSize::Widescreen,
            SizeArg::Standard => SlideSize::Standard,
            SizeArg::A4 => SlideSize::A4,
            SizeArg::Letter => SlideSize::Letter,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FitArg {
    /// Largest size fully inside the slide
    Fit,
    /// Smallest size covering the slide
    Fill,
    /// Unscaled at 96 dpi
    Original,
}

impl From<FitArg> for FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Fit => FitMode::Fit,
            FitArg::Fill => FitMode::Fill,
            FitArg::Original => FitMode::Original,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            size,
            fit,
            quality,
            pages,
            text,
            jpeg,
            settings,
        }) => cmd_convert(
            &input,
            output.as_deref(),
            size,
            fit,
            quality,
            pages.as_deref(),
            text,
            jpeg,
            settings.as_deref(),
        ),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &input,
                    cli.output.as_deref(),
                    None,
                    None,
                    None,
                    None,
                    false,
                    false,
                    None,
                )
            } else {
                println!("{}", "Usage: pdfslides <FILE> [OUTPUT]".yellow());
                println!("       pdfslides --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    size: Option<SizeArg>,
    fit: Option<FitArg>,
    quality: Option<u8>,
    pages: Option<&str>,
    text: bool,
    jpeg: bool,
    settings_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = match settings_file {
        Some(path) => load_settings(path)?,
        None => ConversionSettings::default(),
    };

    if let Some(size) = size {
        settings = settings.with_slide_size(size.into());
    }
    if let Some(fit) = fit {
        settings = settings.with_fit_mode(fit.into());
    }
    if let Some(quality) = quality {
        settings = settings.with_quality(match quality {
            1 => Quality::Low,
            2 => Quality::Medium,
            _ => Quality::High,
        });
    }
    if let Some(pages) = pages {
        settings = apply_page_range(settings, pages)?;
    }
    if text {
        settings = settings.with_text(true);
    }
    if jpeg {
        settings = settings.with_image_format(ImageFormat::Jpeg);
    }

    let output_path = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}.pptx", stem))
    });

    println!(
        "{} {} ({} slide, {} fit)",
        "Converting".cyan().bold(),
        input.display(),
        settings.slide_size.label(),
        match settings.fit_mode {
            FitMode::Fit => "contain",
            FitMode::Fill => "cover",
            FitMode::Original => "original",
        }
    );

    let renderer = PdfiumRenderer::load_file(input)?;

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {percent}% {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let result = convert_with(&renderer, &settings, |progress| {
        pb.set_position(progress.percentage as u64);
        pb.set_message(format!(
            "page {} ({}/{})",
            progress.current_page, progress.current, progress.total
        ));
    })?;
    pb.finish_and_clear();

    fs::write(&output_path, &result.pptx)?;

    if result.slide_count == 0 {
        println!(
            "{} no pages in the selected range; wrote an empty presentation",
            "Note:".yellow()
        );
    }
    println!(
        "{} {} ({} slides, {} estimated, {} actual)",
        "Saved".green().bold(),
        output_path.display(),
        result.slide_count,
        format_file_size(result.estimated_size),
        format_file_size(result.actual_size())
    );

    Ok(())
}

/// Load conversion settings from a JSON file; unspecified fields keep
/// their defaults.
fn load_settings(path: &Path) -> Result<ConversionSettings, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid settings file: {}", e))?;
    Ok(settings)
}

/// Parse "all", "N", "N-M", or "N-" into a page-range setting.
fn apply_page_range(
    settings: ConversionSettings,
    spec: &str,
) -> Result<ConversionSettings, String> {
    let spec = spec.trim();
    if spec.is_empty() || spec == "all" {
        return Ok(settings.all_pages());
    }

    let parse = |s: &str| -> Result<u32, String> {
        s.trim()
            .parse()
            .map_err(|_| format!("Invalid page number: {}", s))
    };

    if let Some((start, end)) = spec.split_once('-') {
        let start = parse(start)?;
        let end = if end.trim().is_empty() {
            None
        } else {
            Some(parse(end)?)
        };
        Ok(settings.with_page_range(start, end))
    } else {
        let page = parse(spec)?;
        Ok(settings.with_page_range(page, Some(page)))
    }
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = PdfiumRenderer::load_file(input)?;
    let page_count = {
        use pdfslides::PageRenderer;
        renderer.page_count()
    };
    let file_size = fs::metadata(input)?.len();
    let first_page = if page_count > 0 {
        Some(renderer.page_size(1)?)
    } else {
        None
    };

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "file_size": file_size,
            "pages": page_count,
            "page_width_pts": first_page.map(|(w, _)| w),
            "page_height_pts": first_page.map(|(_, h)| h),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Size".bold(), format_file_size(file_size));
    println!("{}: {}", "Pages".bold(), page_count);
    if let Some((width, height)) = first_page {
        println!(
            "{}: {:.1} x {:.1} pts ({:.2}\" x {:.2}\")",
            "Page size".bold(),
            width,
            height,
            width / 72.0,
            height / 72.0
        );
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdfslides".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF to PowerPoint conversion tool");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfslides::PageRange;

    #[test]
    fn test_apply_page_range_all() {
        let s = apply_page_range(ConversionSettings::default(), "all").unwrap();
        assert_eq!(s.page_range, PageRange::All);
    }

    #[test]
    fn test_apply_page_range_span() {
        let s = apply_page_range(ConversionSettings::default(), "2-9").unwrap();
        assert_eq!(s.page_range, PageRange::Range);
        assert_eq!(s.start_page, 2);
        assert_eq!(s.end_page, Some(9));
    }

    #[test]
    fn test_apply_page_range_open_end() {
        let s = apply_page_range(ConversionSettings::default(), "4-").unwrap();
        assert_eq!(s.start_page, 4);
        assert_eq!(s.end_page, None);
    }

    #[test]
    fn test_apply_page_range_single() {
        let s = apply_page_range(ConversionSettings::default(), "7").unwrap();
        assert_eq!(s.start_page, 7);
        assert_eq!(s.end_page, Some(7));
    }

    #[test]
    fn test_apply_page_range_invalid() {
        assert!(apply_page_range(ConversionSettings::default(), "x-y").is_err());
    }

    #[test]
    fn test_load_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"quality": "high", "fit_mode": "fill"}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.quality, Quality::High);
        assert_eq!(settings.fit_mode, FitMode::Fill);
        // Unspecified fields keep their defaults
        assert_eq!(settings.slide_size, SlideSize::Widescreen);
    }

    #[test]
    fn test_load_settings_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn test_load_settings_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(&dir.path().join("absent.json")).is_err());
    }
}
