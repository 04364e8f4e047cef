//! Logsift - log analysis CLI
//!
//! `analyze` runs one pass and prints a report, `tui` opens the browser.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use logsift::commands::{self, AnalyzeArgs, TuiArgs};
use logsift::errors::{exit_code, EXIT_SUCCESS};
use logsift::logging;
use logsift_common::config::ColorMode;
use logsift_common::LogsiftConfig;
use std::path::PathBuf;
use tracing::debug;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "logsift")]
#[command(about = "Level counts, top errors and an interactive browser for application logs", long_about = None)]
#[command(version = VERSION)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Config file (overrides LOGSIFT_CONFIG and the default locations)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count lines per level and rank the most frequent errors
    Analyze {
        /// Log file to analyze
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Write the report here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit a JSON report
        #[arg(short, long)]
        json: bool,

        /// Level counts only, skip error ranking
        #[arg(short, long)]
        quick: bool,

        /// How many top errors to list
        #[arg(long, value_name = "N")]
        top: Option<usize>,

        /// Color the text report
        #[arg(long, value_enum, value_name = "WHEN")]
        color: Option<ColorChoice>,
    },

    /// Browse parsed entries interactively
    Tui {
        /// Log file to browse
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Load only the first N lines
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Print version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorMode::Auto,
            ColorChoice::Always => ColorMode::Always,
            ColorChoice::Never => ColorMode::Never,
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        println!("logsift {}", VERSION);
        return Ok(());
    }

    let config = LogsiftConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Analyze {
            input,
            output,
            json,
            quick,
            top,
            color,
        } => commands::analyze(
            &config,
            AnalyzeArgs {
                input,
                output,
                json,
                quick,
                top,
                color: color.map(ColorMode::from),
            },
        ),
        Commands::Tui { input, limit } => commands::tui(&config, TuiArgs { input, limit }),
        Commands::Version => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match run(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("logsift: {:#}", err);
            exit_code(&err)
        }
    };

    std::process::exit(code);
}
