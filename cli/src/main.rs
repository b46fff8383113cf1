//! pdfdesk CLI - PDF page manipulation tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfdesk::{
    ConvertMode, ConvertOptions, MergeInput, NumberPosition, PageNumberOptions, PageRange,
    StructureConverter, WatermarkOptions,
};

#[derive(Parser)]
#[command(name = "pdfdesk")]
#[command(version)]
#[command(about = "Merge, split, rotate, watermark, and inspect PDF files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge two or more PDFs into one
    Merge {
        /// Input PDF files, in output order
        #[arg(value_name = "FILE", required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "merged.pdf")]
        output: PathBuf,

        /// Page range applied to every input (e.g., "1-5,8")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Extract a page range into a new PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages to keep (e.g., "1-5,8,10-12")
        #[arg(value_name = "PAGES")]
        pages: String,

        /// Output file (default: <input>_extracted.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Delete a page range
    Delete {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages to remove (e.g., "2,5-7")
        #[arg(value_name = "PAGES")]
        pages: String,

        /// Output file (default: <input>_deleted.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Rearrange pages into an explicit order
    Reorder {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// New page order, comma-separated (e.g., "3,1,2")
        #[arg(value_name = "ORDER")]
        order: String,

        /// Output file (default: <input>_reordered.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Rotate pages by a multiple of 90 degrees
    Rotate {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Degrees (90, 180, 270, or negative)
        #[arg(value_name = "DEGREES", allow_hyphen_values = true)]
        degrees: i64,

        /// Pages to rotate (default: all)
        #[arg(long)]
        pages: Option<String>,

        /// Output file (default: <input>_rotated.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Split into one file per page
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (default: <input>_pages)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Stamp a text watermark across every page
    Watermark {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Watermark text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Font size in points
        #[arg(long, default_value = "60")]
        font_size: f32,

        /// Opacity, 0.0-1.0
        #[arg(long, default_value = "0.3")]
        opacity: f32,

        /// Rotation in degrees
        #[arg(long, default_value = "-45", allow_hyphen_values = true)]
        angle: f32,

        /// Output file (default: <input>_watermarked.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Add page number footers
    Number {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print "3" instead of "3 of 12"
        #[arg(long)]
        no_total: bool,

        /// Number printed on the first page
        #[arg(long, default_value = "1")]
        start: u32,

        /// Footer position
        #[arg(long, value_enum, default_value = "center")]
        position: FooterPosition,

        /// Output file (default: <input>_numbered.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Re-save with streams compressed
    Compress {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (default: <input>_compressed.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document metadata
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Convert extracted text to Markdown or normalized text
    #[command(alias = "md")]
    Convert {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        mode: OutputMode,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FooterPosition {
    Left,
    Center,
    Right,
}

impl From<FooterPosition> for NumberPosition {
    fn from(position: FooterPosition) -> Self {
        match position {
            FooterPosition::Left => NumberPosition::BottomLeft,
            FooterPosition::Center => NumberPosition::BottomCenter,
            FooterPosition::Right => NumberPosition::BottomRight,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// Heuristic Markdown
    Markdown,
    /// Normalized plain text
    Text,
}

impl From<OutputMode> for ConvertMode {
    fn from(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Markdown => ConvertMode::Markdown,
            OutputMode::Text => ConvertMode::Text,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge {
            inputs,
            output,
            pages,
        } => cmd_merge(&inputs, &output, pages.as_deref()),
        Commands::Extract {
            input,
            pages,
            output,
        } => cmd_extract(&input, &pages, output.as_deref()),
        Commands::Delete {
            input,
            pages,
            output,
        } => cmd_delete(&input, &pages, output.as_deref()),
        Commands::Reorder {
            input,
            order,
            output,
        } => cmd_reorder(&input, &order, output.as_deref()),
        Commands::Rotate {
            input,
            degrees,
            pages,
            output,
        } => cmd_rotate(&input, degrees, pages.as_deref(), output.as_deref()),
        Commands::Split { input, output } => cmd_split(&input, output.as_deref()),
        Commands::Watermark {
            input,
            text,
            font_size,
            opacity,
            angle,
            output,
        } => cmd_watermark(&input, &text, font_size, opacity, angle, output.as_deref()),
        Commands::Number {
            input,
            no_total,
            start,
            position,
            output,
        } => cmd_number(&input, no_total, start, position, output.as_deref()),
        Commands::Compress { input, output } => cmd_compress(&input, output.as_deref()),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Convert {
            input,
            mode,
            output,
        } => cmd_convert(&input, mode, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// `<stem>_<suffix>.pdf` next to the input.
fn derived_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_{}.pdf", stem, suffix))
}

fn write_output(path: &Path, bytes: &[u8]) -> CmdResult {
    fs::write(path, bytes)?;
    println!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

fn cmd_merge(inputs: &[PathBuf], output: &Path, pages: Option<&str>) -> CmdResult {
    let range = pages.map(PageRange::validate).transpose()?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut buffers = Vec::with_capacity(inputs.len());
    for path in inputs {
        pb.set_message(path.display().to_string());
        buffers.push(fs::read(path)?);
        pb.inc(1);
    }
    pb.finish_with_message("merging");

    let merge_inputs: Vec<MergeInput> = buffers
        .iter()
        .map(|bytes| MergeInput {
            bytes,
            range: range.clone(),
        })
        .collect();
    let merged = pdfdesk::merge(&merge_inputs)?;

    write_output(output, &merged)
}

fn cmd_extract(input: &Path, pages: &str, output: Option<&Path>) -> CmdResult {
    let range = PageRange::validate(pages)?;
    let bytes = fs::read(input)?;
    let out = pdfdesk::extract_pages(&bytes, &range)?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_output(input, "extracted"));
    write_output(&target, &out)
}

fn cmd_delete(input: &Path, pages: &str, output: Option<&Path>) -> CmdResult {
    let range = PageRange::validate(pages)?;
    let bytes = fs::read(input)?;
    let out = pdfdesk::delete_pages(&bytes, &range)?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_output(input, "deleted"));
    write_output(&target, &out)
}

fn cmd_reorder(input: &Path, order: &str, output: Option<&Path>) -> CmdResult {
    let order: Vec<u32> = order
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid page number: {:?}", part.trim()))
        })
        .collect::<Result<_, _>>()?;

    let bytes = fs::read(input)?;
    let out = pdfdesk::reorder_pages(&bytes, &order)?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_output(input, "reordered"));
    write_output(&target, &out)
}

fn cmd_rotate(input: &Path, degrees: i64, pages: Option<&str>, output: Option<&Path>) -> CmdResult {
    let range = pages.map(PageRange::validate).transpose()?;
    let bytes = fs::read(input)?;
    let out = pdfdesk::rotate_pages(&bytes, range.as_ref(), degrees)?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_output(input, "rotated"));
    write_output(&target, &out)
}

fn cmd_split(input: &Path, output: Option<&Path>) -> CmdResult {
    let out_dir = output.map(Path::to_path_buf).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}_pages", stem))
    });
    fs::create_dir_all(&out_dir)?;

    let bytes = fs::read(input)?;
    let parts = pdfdesk::split(&bytes)?;

    let pb = ProgressBar::new(parts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    for (name, data) in &parts {
        pb.set_message(name.clone());
        fs::write(out_dir.join(name), data)?;
        pb.inc(1);
    }
    pb.finish_with_message("done");

    println!(
        "{} {} files in {}",
        "Wrote".green(),
        parts.len(),
        out_dir.display()
    );
    Ok(())
}

fn cmd_watermark(
    input: &Path,
    text: &str,
    font_size: f32,
    opacity: f32,
    angle: f32,
    output: Option<&Path>,
) -> CmdResult {
    let options = WatermarkOptions {
        text: text.to_string(),
        font_size,
        opacity,
        angle,
    };
    let bytes = fs::read(input)?;
    let out = pdfdesk::add_watermark(&bytes, &options)?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_output(input, "watermarked"));
    write_output(&target, &out)
}

fn cmd_number(
    input: &Path,
    no_total: bool,
    start: u32,
    position: FooterPosition,
    output: Option<&Path>,
) -> CmdResult {
    let options = PageNumberOptions {
        include_total: !no_total,
        start_at: start,
        position: position.into(),
        ..Default::default()
    };
    let bytes = fs::read(input)?;
    let out = pdfdesk::add_page_numbers(&bytes, &options)?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_output(input, "numbered"));
    write_output(&target, &out)
}

fn cmd_compress(input: &Path, output: Option<&Path>) -> CmdResult {
    let bytes = fs::read(input)?;
    let out = pdfdesk::compress(&bytes)?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derived_output(input, "compressed"));

    let before = bytes.len();
    let after = out.len();
    write_output(&target, &out)?;
    println!(
        "  {} {} -> {} bytes",
        "Size:".dimmed(),
        before,
        after
    );
    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> CmdResult {
    let bytes = fs::read(input)?;
    let info = pdfdesk::read_info(&bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), info.version);
    println!("{}: {}", "Pages".bold(), info.page_count);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if info.encrypted { "Yes" } else { "No" }
    );

    if let Some(ref title) = info.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = info.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref subject) = info.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref keywords) = info.keywords {
        println!("{}: {}", "Keywords".bold(), keywords);
    }
    if let Some(ref creator) = info.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = info.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = info.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = info.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for page in &info.pages {
        let rotation = if page.rotation != 0 {
            format!(", rotated {}°", page.rotation)
        } else {
            String::new()
        };
        println!(
            "  {} {:.0} x {:.0} pt{}",
            format!("{}:", page.number).bold(),
            page.width,
            page.height,
            rotation
        );
    }

    Ok(())
}

fn cmd_convert(input: &Path, mode: OutputMode, output: Option<&Path>) -> CmdResult {
    let text = fs::read_to_string(input)?;
    let converter = StructureConverter::new();
    let result = converter.convert(&text, &ConvertOptions::new(mode.into()));

    if let Some(path) = output {
        fs::write(path, &result)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result);
    }

    Ok(())
}
