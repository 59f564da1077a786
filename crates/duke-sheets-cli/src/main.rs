//! Duke Sheets CLI - ODS table extraction tool

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use duke_sheets_ods::{EmptyCells, OdsPackage, OdsReadOptions, OdsReader, Strictness, Table};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "duke")]
#[command(author, version, about = "Extract tables from ODS spreadsheets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet to CSV and output to stdout or file
    #[command(alias = "csv")]
    ToCsv {
        /// Input spreadsheet file (ods)
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Convert a spreadsheet to a JSON array of rows
    #[command(alias = "json")]
    ToJson {
        /// Input spreadsheet file (ods)
        input: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the output
        #[arg(short, long)]
        pretty: bool,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Show information about a spreadsheet
    Info {
        /// Input spreadsheet file
        input: PathBuf,
    },
}

#[derive(Args)]
struct DecodeArgs {
    /// Emit empty strings for blank cells so every row has the same width
    #[arg(long)]
    pad_empty: bool,

    /// Return the rows read so far when content.xml is malformed
    #[arg(long)]
    lenient: bool,
}

impl DecodeArgs {
    fn options(&self) -> OdsReadOptions {
        let mut options = OdsReadOptions::default();
        if self.pad_empty {
            options = options.with_empty_cells(EmptyCells::Pad);
        }
        if self.lenient {
            options = options.with_strictness(Strictness::Lenient);
        }
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ToCsv {
            input,
            output,
            delimiter,
            decode,
        } => to_csv(&input, output.as_deref(), delimiter, &decode.options()),
        Commands::ToJson {
            input,
            output,
            pretty,
            decode,
        } => to_json(&input, output.as_deref(), pretty, &decode.options()),
        Commands::Info { input } => show_info(&input),
    }
}

fn load(input: &Path, options: &OdsReadOptions) -> Result<Table> {
    OdsReader::read_file(input, options)
        .with_context(|| format!("Failed to read '{}'", input.display()))
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn to_csv(
    input: &Path,
    output: Option<&Path>,
    delimiter: char,
    options: &OdsReadOptions,
) -> Result<()> {
    if !delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be a single ASCII character, got '{delimiter}'");
    }

    let table = load(input, options)?;
    if table.is_empty() {
        eprintln!("Warning: Sheet appears to be empty");
    }

    // Rows may differ in width unless --pad-empty is set
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_writer(open_output(output)?);

    for row in &table {
        writer.write_record(row).context("Failed to write CSV record")?;
    }
    writer.flush().context("Failed to write CSV output")?;

    if let Some(path) = output {
        eprintln!("Wrote {} rows to '{}'", table.len(), path.display());
    }
    Ok(())
}

fn to_json(
    input: &Path,
    output: Option<&Path>,
    pretty: bool,
    options: &OdsReadOptions,
) -> Result<()> {
    let table = load(input, options)?;
    let mut writer = open_output(output)?;

    if pretty {
        serde_json::to_writer_pretty(&mut writer, &table)
    } else {
        serde_json::to_writer(&mut writer, &table)
    }
    .context("Failed to write JSON output")?;
    writeln!(writer).context("Failed to write JSON output")?;
    writer.flush().context("Failed to write JSON output")?;

    if let Some(path) = output {
        eprintln!("Wrote {} rows to '{}'", table.len(), path.display());
    }
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let mut package = OdsPackage::open(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Entries:");
    let mut names: Vec<String> = package.entry_names().map(str::to_string).collect();
    names.sort();
    for name in &names {
        println!("  {name}");
    }

    let content = package
        .content_stream()
        .context("Failed to open content.xml")?;
    println!("Content size: {} bytes", content.len());

    let table = OdsReader::decode(content).context("Failed to decode content.xml")?;
    if table.is_empty() {
        println!("Rows: 0");
        return Ok(());
    }

    let narrowest = table.iter().map(Vec::len).min().unwrap_or(0);
    println!("Rows: {}", table.len());
    println!("Columns: {} to {}", narrowest, table.width());

    Ok(())
}
