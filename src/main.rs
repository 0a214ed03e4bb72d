use clap::{Parser, Subcommand};
use sheetbind::cli::{self, DumpFormat};
use sheetbind::error::SheetResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetbind")]
#[command(about = "Typed records <-> spreadsheet sheets")]
#[command(long_about = "sheetbind - map typed record lists to styled .xlsx sheets and back

COMMANDS:
  inspect  - List sheets, headers and row counts
  dump     - Print every sheet as rows of cell text (JSON or YAML)
  demo     - Export a sample record list to .xlsx

EXAMPLES:
  sheetbind inspect people.xlsx
  sheetbind dump people.xlsx --format yaml
  sheetbind demo sample.xlsx --rows 50 --styles styles.yaml

Set RUST_LOG=sheetbind=debug for pipeline logs.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sheets, header titles and body row counts
    Inspect {
        /// Path to .xlsx file
        file: PathBuf,
    },

    /// Print every sheet as rows of canonical cell text
    Dump {
        /// Path to .xlsx file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: DumpFormat,
    },

    #[command(long_about = "Export a generated list of sample records to an .xlsx file.

The sample sheet has Name, Age, Share (percentage), Balance (currency) and
Active columns. A Secret field exists on the record but is excluded from the
sheet.

STYLES:
  --styles accepts a YAML or JSON file overriding the header/body styles:

  header:
    font:
      bold: true
      color: \"#FFFFFF\"
    fill: \"#1F4E78\"
    thin_border: true
    centered: true")]
    /// Export sample records to an .xlsx file
    Demo {
        /// Output .xlsx path
        output: PathBuf,

        /// Number of sample records
        #[arg(short, long, default_value = "10")]
        rows: usize,

        /// Style preset file (YAML or JSON)
        #[arg(short, long, env = "SHEETBIND_STYLES")]
        styles: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> SheetResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetbind=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file } => cli::inspect(file),

        Commands::Dump { file, format } => cli::dump(file, format),

        Commands::Demo {
            output,
            rows,
            styles,
            verbose,
        } => cli::demo(output, rows, styles, verbose),
    }
}
