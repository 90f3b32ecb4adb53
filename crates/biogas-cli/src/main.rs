mod commands;
mod output;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "biogas",
    version,
    about = "Estimate biogas and biomethane yields from municipal solid-waste surveys"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run separation, biogas, biomethane and municipal summaries on a survey
    Analyze {
        /// Path to survey XLSX, or JSON list of pre-coerced records
        input_file: PathBuf,

        /// Sheet to read (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Header of the municipality column
        #[arg(long, default_value = "Municipality")]
        municipality_column: String,

        /// Header of the total waste column
        #[arg(long, default_value = "Total")]
        total_column: String,

        /// Header of the domestic+public waste column
        #[arg(long, default_value = "Domestic+Public")]
        domestic_public_column: String,

        /// Header of the pruning waste column
        #[arg(long, default_value = "Pruning")]
        pruning_column: String,

        /// JSON configuration file (default: built-in survey defaults)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Biogas to biomethane purification efficiency in percent (0-100)
        #[arg(long, value_name = "PCT")]
        purification: Option<Decimal>,

        /// Municipalities shown before the rest is grouped as "Other"
        #[arg(long)]
        top_n: Option<usize>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the JSON report to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// List the sheets and header columns of a survey workbook
    Columns {
        /// Path to survey XLSX
        input_file: PathBuf,

        /// Sheet to inspect (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Inspect and validate calculation configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the built-in defaults as a JSON configuration file
    Show,
    /// Print the configuration fields with descriptions
    Schema,
    /// Validate a configuration file
    Validate {
        /// Path to JSON configuration file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            input_file,
            sheet,
            municipality_column,
            total_column,
            domestic_public_column,
            pruning_column,
            config,
            purification,
            top_n,
            output,
            out,
        } => commands::analyze::run(commands::analyze::AnalyzeArgs {
            input_file,
            sheet,
            mapping: biogas_core::ingest::ColumnMapping {
                municipality: municipality_column,
                total: total_column,
                domestic_public: domestic_public_column,
                pruning: pruning_column,
            },
            config_file: config,
            purification,
            top_n,
            output_format: output,
            out,
        }),
        Commands::Columns { input_file, sheet } => {
            commands::columns::run(&input_file, sheet.as_deref())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Schema => commands::config::schema(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error ({} stage): {e}", e.stage());
        std::process::exit(1);
    }
}
