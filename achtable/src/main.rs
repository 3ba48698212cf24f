//! achtable CLI - edit ACH files as CSV tables
//!
//! ```bash
//! achtable flatten payroll.json -o tables/        # write the table CSVs
//! achtable rebuild payroll.json -t tables/ -o out.json
//! achtable schema entries                         # columns of one table
//! achtable summary payroll.json                   # counts and control totals
//! ```
//!
//! Defaults come from `ACHTABLE_*` variables, optionally in a `.env` file.

use achtable::{
    flatten_to_dir, load_file, rebuild_from_dir, schema_for, write_file_json, FileSummary,
    PipelineError, Settings, TableKind, LOG_SINK, SCHEMA_VERSION,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "achtable")]
#[command(about = "Flatten ACH files into editable tables and rebuild them", long_about = None)]
struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the tables of a JSON ACH file as CSV
    Flatten {
        /// Input ACH file (JSON)
        input: PathBuf,

        /// Output directory (default: ACHTABLE_TABLES_DIR or ./tables)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSV delimiter (default: ACHTABLE_DELIMITER or ',')
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Rebuild an ACH file from its original and edited tables
    Rebuild {
        /// Original ACH file (JSON) the tables were flattened from
        input: PathBuf,

        /// Directory of edited tables (default: ACHTABLE_TABLES_DIR or ./tables)
        #[arg(short, long)]
        tables: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Show table columns and their types
    Schema {
        /// Table name (all tables if omitted)
        table: Option<String>,
    },

    /// Show counts and recalculated control totals
    Summary {
        /// Input ACH file (JSON)
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::from_env();
    LOG_SINK.set_quiet(cli.quiet || settings.quiet);

    let result = match cli.command {
        Commands::Flatten {
            input,
            output,
            delimiter,
        } => cmd_flatten(&settings, &input, output.as_deref(), delimiter),

        Commands::Rebuild {
            input,
            tables,
            output,
            delimiter,
        } => cmd_rebuild(&settings, &input, tables.as_deref(), output.as_deref(), delimiter),

        Commands::Schema { table } => cmd_schema(table.as_deref()),

        Commands::Summary { input, json } => cmd_summary(&input, json),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8, Box<dyn std::error::Error>> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(format!("delimiter '{}' is not a single ASCII character", delimiter).into())
    }
}

fn cmd_flatten(
    settings: &Settings,
    input: &Path,
    output: Option<&Path>,
    delimiter: Option<char>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Flattening: {}", input.display());

    let file = load_file(input)?;
    let dir = output.unwrap_or(settings.tables_dir.as_path());
    let delimiter = match delimiter {
        Some(d) => delimiter_byte(d)?,
        None => settings.delimiter,
    };

    let report = flatten_to_dir(&file, dir, delimiter)?;
    for path in &report.paths {
        eprintln!("   💾 {}", path.display());
    }
    eprintln!("✅ Wrote {} tables (schema v{})", report.paths.len(), SCHEMA_VERSION);
    Ok(())
}

fn cmd_rebuild(
    settings: &Settings,
    input: &Path,
    tables: Option<&Path>,
    output: Option<&Path>,
    delimiter: Option<char>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Rebuilding: {}", input.display());

    let original = Arc::new(load_file(input)?);
    let dir = tables.unwrap_or(settings.tables_dir.as_path());
    let delimiter = delimiter.map(delimiter_byte).transpose()?;

    let rebuilt = rebuild_from_dir(original, dir, delimiter)?;

    let warnings = LOG_SINK
        .drain()
        .into_iter()
        .filter(|e| e.level == achtable::LogLevel::Warning)
        .count();
    if warnings > 0 {
        eprintln!("   ⚠️  {} addenda rows skipped", warnings);
    }

    match output {
        Some(path) => {
            write_file_json(&rebuilt, BufWriter::new(fs::File::create(path)?))?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => write_file_json(&rebuilt, io::stdout().lock())?,
    }
    Ok(())
}

fn cmd_schema(table: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let kinds = match table {
        Some(name) => vec![name
            .parse::<TableKind>()
            .map_err(|_| PipelineError::UnknownTable(name.to_string()))?],
        None => TableKind::ALL.to_vec(),
    };

    println!("schema version {}", SCHEMA_VERSION);
    for kind in kinds {
        let schema = schema_for(kind);
        println!("\n{} ({} columns)", kind, schema.len());
        for column in schema.columns {
            println!("  {:<48} {}", column.name, column.column_type.as_str());
        }
    }
    Ok(())
}

fn cmd_summary(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = load_file(input)?;
    let summary = FileSummary::of(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("📊 {}", input.display());
    println!(
        "   Batches:        {} ({} IAT)",
        summary.batches + summary.iat_batches,
        summary.iat_batches
    );
    println!("   Entries:        {}", summary.entries);
    println!("   Addenda:        {}", summary.addenda);
    println!("   Entry/addenda:  {}", summary.entry_addenda_count);
    println!("   Entry hash:     {:010}", summary.entry_hash);
    println!("   Total debit:    {}", summary.total_debit);
    println!("   Total credit:   {}", summary.total_credit);
    println!("   Blocks:         {}", summary.block_count);
    Ok(())
}
