use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod cli;

/// weeknight - Weekly dinner planning
#[derive(Parser)]
#[command(name = "weeknight")]
#[command(about = "Constraint-based weekly dinner planner", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate dinners for a week, printed as JSON unless saved
    Generate {
        /// First day of the plan (YYYY-MM-DD), next week by default
        #[arg(long)]
        week: Option<NaiveDate>,

        #[arg(long)]
        dinners: Option<u8>,

        #[arg(long)]
        seed: Option<String>,

        /// Store the plan and record the recipes as cooked
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        constraints: cli::plan::ConstraintArgs,
    },
    /// Pick new recipes for the unlocked days of a saved plan
    Regenerate {
        id: String,

        #[arg(long)]
        seed: Option<String>,
    },
    /// Lock days of a saved plan
    Lock {
        id: String,

        #[arg(required = true)]
        dates: Vec<NaiveDate>,

        #[arg(long)]
        unlock: bool,
    },
    /// Replace the recipe of one day
    Swap {
        id: String,

        date: NaiveDate,

        #[arg(long)]
        seed: Option<String>,
    },
    /// Print a saved plan as CSV, JSON or a text shopping list
    Export {
        id: String,

        #[arg(long, default_value = "txt")]
        format: weeknight_mealplan::ExportFormat,
    },
    /// List saved plans, newest first
    List {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = weeknight::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    weeknight::observability::init_observability(
        "weeknight",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Generate {
            week,
            dinners,
            seed,
            save,
            constraints,
        } => cli::plan::generate(config, week, dinners, seed, constraints, save).await,
        Commands::Regenerate { id, seed } => cli::plan::regenerate(config, id, seed).await,
        Commands::Lock { id, dates, unlock } => cli::plan::lock(config, id, dates, unlock).await,
        Commands::Swap { id, date, seed } => cli::plan::swap(config, id, date, seed).await,
        Commands::Export { id, format } => cli::plan::export(config, id, format).await,
        Commands::List { from, to } => cli::plan::list(config, from, to).await,
    }
}
