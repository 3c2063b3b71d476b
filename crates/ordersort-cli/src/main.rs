mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ordersort",
    version,
    about = "Sort marketplace order sheets into per-worker picking lists"
)]
struct Cli {
    /// Log classification decisions (debug level)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Layout {
    /// One sheet with every row in priority order
    Single,
    /// One sheet per worker with rows
    PerWorker,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an order sheet (XLSX or CSV) and print worker statistics
    Classify {
        /// Path to the order sheet
        input_file: PathBuf,

        /// Custom JSON settings file (worker order and product rules)
        #[arg(short, long, value_name = "FILE", env = "ORDERSORT_SETTINGS")]
        settings: Option<PathBuf>,

        /// Predefined settings, used when no settings file is given
        #[arg(short, long, default_value = "default")]
        preset: String,

        /// Drop star-delivery rows before classifying
        #[arg(long)]
        filter_star: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the sorted rows: an .xlsx/.csv/.json file, or a directory for per-worker CSVs
        #[arg(short = 'E', long = "export", value_name = "PATH")]
        export: Option<PathBuf>,

        /// Export layout
        #[arg(long, value_enum, default_value = "single")]
        layout: Layout,

        /// With --layout per-worker, also write an all-rows sheet first
        #[arg(long)]
        all_sheet: bool,

        /// Append assigned worker, match reason and confidence columns to the export
        #[arg(long)]
        keep_classification: bool,
    },
    /// Remove star-delivery rows from an order sheet without classifying
    Filter {
        /// Path to the order sheet
        input_file: PathBuf,

        /// Write the remaining rows as CSV
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,
    },
    /// Manage and inspect settings
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List predefined settings
    List,
    /// Explain predefined settings in plain language
    Explain {
        /// Preset name (e.g., "default")
        preset: String,
    },
    /// Print the JSON settings schema with field descriptions and example
    Schema,
    /// Validate a custom settings file
    Validate {
        /// Path to JSON settings file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "ordersort_core=debug,ordersort=debug"
        } else {
            "warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Classify {
            input_file,
            settings,
            preset,
            filter_star,
            output,
            export,
            layout,
            all_sheet,
            keep_classification,
        } => commands::classify::run(commands::classify::ClassifyArgs {
            input_file,
            settings,
            preset,
            filter_star,
            output_format: output,
            export,
            layout,
            all_sheet,
            keep_classification,
        }),
        Commands::Filter { input_file, out } => commands::filter::run(input_file, out),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { preset } => commands::rules::explain(&preset),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
