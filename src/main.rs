use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxrates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxrates::AppCommand {
    fn from(cmd: Commands) -> fxrates::AppCommand {
        match cmd {
            Commands::Refresh => fxrates::AppCommand::Refresh,
            Commands::Rate {
                from,
                to,
                precision,
            } => fxrates::AppCommand::Rate {
                from: from.to_uppercase(),
                to: to.to_uppercase(),
                precision,
            },
            Commands::Convert {
                amount,
                from,
                to,
                precision,
            } => fxrates::AppCommand::Convert {
                amount,
                from: from.to_uppercase(),
                to: to.to_uppercase(),
                precision,
            },
            Commands::List => fxrates::AppCommand::List,
            Commands::Clear => fxrates::AppCommand::Clear,
            Commands::Setup { .. } => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup {
        /// Access key to write into the new configuration
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Fetch live quotes and store them in the cache
    Refresh,
    /// Show the exchange rate between two currencies
    Rate {
        /// Currency to convert from, e.g. EUR
        from: String,
        /// Currency to convert to, e.g. GBP
        to: String,
        /// Decimal digits to round to
        #[arg(short, long)]
        precision: Option<u32>,
    },
    /// Convert an amount between two currencies
    Convert {
        amount: f64,
        from: String,
        to: String,
        /// Decimal digits to round the converted amount to
        #[arg(short, long)]
        precision: Option<u32>,
    },
    /// Display the cached rates
    List,
    /// Delete the rate cache
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup { api_key }) => fxrates::cli::setup::setup(api_key.as_deref()),
        Some(cmd) => fxrates::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
