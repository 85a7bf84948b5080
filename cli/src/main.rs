//! docsift CLI - hybrid text-layer and OCR extraction tool

use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use docsift::{
    export_images, extract_with_options, DocumentKind, ExportOptions, ExtractOptions,
    ExtractionStats, ImageFormat, JsonFormat, PageSelection, ToolPaths, DEFAULT_DPI,
    DEFAULT_MIN_TEXT_CHARS,
};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Extract text from PDF, DOCX, and TXT files with OCR fallback", long_about = None)]
#[command(after_help = "\
With FILE and LANGUAGE the file is extracted to text. With FILE alone every PDF page is
exported as a JSON array of data URIs.

A file named like a subcommand (extract, images) must be given with a path prefix,
e.g. `docsift ./images eng`.")]
struct Cli {
    /// Input file (.pdf, .docx, .txt)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Language tag (e.g., "traditional-chinese"); omit to export page images
    #[arg(value_name = "LANGUAGE")]
    language: Option<String>,

    /// pdftoppm binary used for rasterization
    #[arg(long, global = true, env = "DOCSIFT_PDFTOPPM", value_name = "BIN", default_value = "pdftoppm")]
    pdftoppm: PathBuf,

    /// tesseract binary used for OCR
    #[arg(long, global = true, env = "DOCSIFT_TESSERACT", value_name = "BIN", default_value = "tesseract")]
    tesseract: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text, using OCR for pages without a usable text layer
    Extract {
        /// Input file (.pdf, .docx, .txt)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Language tag (e.g., "traditional-chinese")
        #[arg(value_name = "LANGUAGE")]
        language: String,

        /// Page range (e.g., "all", "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Trimmed text-layer length a page must exceed to skip OCR
        #[arg(long, default_value_t = DEFAULT_MIN_TEXT_CHARS)]
        min_text_chars: usize,

        /// Rasterization resolution for OCR
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u32,

        /// Output the extraction result as JSON
        #[arg(long)]
        json: bool,

        /// Print a summary to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Export every PDF page as a base64 data URI
    Images {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page range (e.g., "all", "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Rasterization resolution
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u32,

        /// Output image format
        #[arg(long, value_enum, default_value = "jpeg")]
        format: FormatArg,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// JPEG images
    Jpeg,
    /// PNG images
    Png,
}

impl From<FormatArg> for ImageFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Jpeg => ImageFormat::Jpeg,
            FormatArg::Png => ImageFormat::Png,
        }
    }
}

/// What the invocation was doing, used to pick the diagnostic prefix.
#[derive(Clone, Copy)]
enum Operation {
    Extract(DocumentKind),
    Images,
}

/// Invocation selected by the bare positional form.
#[derive(Debug, PartialEq, Eq)]
enum Positional {
    /// `docsift FILE LANGUAGE`
    Extract(PathBuf, String),
    /// `docsift FILE`
    Images(PathBuf),
}

fn positional(input: Option<PathBuf>, language: Option<String>) -> Option<Positional> {
    match (input, language) {
        (Some(input), Some(language)) => Some(Positional::Extract(input, language)),
        (Some(input), None) => Some(Positional::Images(input)),
        (None, _) => None,
    }
}

fn missing_arguments() -> clap::Error {
    Cli::command().error(
        ErrorKind::MissingRequiredArgument,
        "Usage: docsift <FILE> [LANGUAGE]",
    )
}

struct ExtractArgs<'a> {
    input: &'a Path,
    language: &'a str,
    pages: Option<&'a str>,
    min_text_chars: usize,
    dpi: u32,
    json: bool,
    stats: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let tools = ToolPaths::default()
        .with_pdftoppm(&cli.pdftoppm)
        .with_tesseract(&cli.tesseract);

    let (operation, result) = match cli.command {
        Some(Commands::Extract {
            input,
            language,
            pages,
            min_text_chars,
            dpi,
            json,
            stats,
        }) => (
            Operation::Extract(DocumentKind::from_path(&input)),
            cmd_extract(
                &ExtractArgs {
                    input: &input,
                    language: &language,
                    pages: pages.as_deref(),
                    min_text_chars,
                    dpi,
                    json,
                    stats,
                },
                &tools,
            ),
        ),
        Some(Commands::Images {
            input,
            pages,
            dpi,
            format,
        }) => (
            Operation::Images,
            cmd_images(&input, pages.as_deref(), dpi, format, &tools),
        ),
        None => match positional(cli.input, cli.language) {
            Some(Positional::Extract(input, language)) => (
                Operation::Extract(DocumentKind::from_path(&input)),
                cmd_extract(
                    &ExtractArgs {
                        input: &input,
                        language: &language,
                        pages: None,
                        min_text_chars: DEFAULT_MIN_TEXT_CHARS,
                        dpi: DEFAULT_DPI,
                        json: false,
                        stats: false,
                    },
                    &tools,
                ),
            ),
            Some(Positional::Images(input)) => (
                Operation::Images,
                cmd_images(&input, None, DEFAULT_DPI, FormatArg::Jpeg, &tools),
            ),
            None => missing_arguments().exit(),
        },
    };

    if let Err(e) = result {
        eprintln!(
            "{}: {}",
            error_prefix(operation, &*e).red().bold(),
            e
        );
        std::process::exit(1);
    }
}

fn error_prefix(operation: Operation, error: &(dyn std::error::Error + 'static)) -> &'static str {
    match error.downcast_ref::<docsift::Error>() {
        None | Some(docsift::Error::InvalidPageRange(_)) => "An unexpected error occurred",
        Some(_) => match operation {
            Operation::Images => "Error converting PDF to images",
            Operation::Extract(DocumentKind::Pdf) => "Error processing PDF file",
            Operation::Extract(_) => "An unexpected error occurred",
        },
    }
}

fn page_selection(pages: Option<&str>) -> Result<PageSelection, docsift::Error> {
    match pages {
        Some(p) => PageSelection::parse(p),
        None => Ok(PageSelection::All),
    }
}

fn cmd_extract(args: &ExtractArgs<'_>, tools: &ToolPaths) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions::new()
        .with_language(args.language)
        .with_pages(page_selection(args.pages)?)
        .with_min_text_chars(args.min_text_chars)
        .with_dpi(args.dpi)
        .with_tools(tools.clone());

    log::debug!(
        "Extracting {} with engine language {}",
        args.input.display(),
        options.engine_language()
    );
    let result = extract_with_options(args.input, &options)?;

    if args.json {
        println!("{}", docsift::render::to_json(&result, JsonFormat::Pretty)?);
    } else {
        println!("{}", docsift::render::assemble(&result));
    }

    if args.stats {
        let stats = ExtractionStats::from_result(&result);
        if args.json {
            eprintln!("{}", serde_json::to_string(&stats)?);
        } else {
            print_stats(&stats);
        }
    }

    Ok(())
}

fn print_stats(stats: &ExtractionStats) {
    eprintln!("{}", "Extraction Summary".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Fragments".bold(), stats.fragment_count);
    eprintln!("{}: {}", "Text layer".bold(), stats.text_layer_count);
    eprintln!("{}: {}", "OCR fallback".bold(), stats.ocr_count);
    if stats.error_count > 0 {
        eprintln!("{}: {}", "Errors".bold(), stats.error_count.to_string().red());
    } else {
        eprintln!("{}: {}", "Errors".bold(), stats.error_count);
    }
    if stats.masked_read_errors > 0 {
        eprintln!(
            "{}: {}",
            "Unreadable text layers".bold(),
            stats.masked_read_errors.to_string().yellow()
        );
    }
    eprintln!("{}: {}", "Words".bold(), stats.word_count);
    eprintln!("{}: {}", "Characters".bold(), stats.char_count);
}

fn cmd_images(
    input: &Path,
    pages: Option<&str>,
    dpi: u32,
    format: FormatArg,
    tools: &ToolPaths,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExportOptions::new()
        .with_pages(page_selection(pages)?)
        .with_dpi(dpi)
        .with_format(format.into())
        .with_tools(tools.clone());

    let images = export_images(input, &options)?;
    println!("{}", docsift::render::to_json_array(&images)?);

    Ok(())
}
