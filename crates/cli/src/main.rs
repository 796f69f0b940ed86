//! Storelab CLI - schema lifecycle, seeding, and reports.
//!
//! # Usage
//!
//! ```bash
//! # Create the schema
//! storelab setup
//!
//! # Drop and recreate it
//! storelab reset
//!
//! # Load the sample data set
//! storelab seed
//!
//! # Reports
//! storelab report summary
//! storelab report summary --customer-id 1
//! storelab report history --customer-id 1
//! storelab report stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string, e.g. `sqlite://storelab.db`
//!   (also read from a `.env` file)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "storelab")]
#[command(author, version, about = "Storelab practice-database tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema (tables, indexes, and the order_summary view)
    Setup,
    /// Drop and recreate the schema
    Reset,
    /// Load the sample data set
    Seed,
    /// Read-only reports
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Order summaries, optionally limited to one customer
    Summary {
        /// Only this customer's orders
        #[arg(long)]
        customer_id: Option<i64>,
    },
    /// A customer's order history, newest first
    History {
        /// The customer to report on
        #[arg(long)]
        customer_id: i64,
    },
    /// Aggregate order statistics
    Stats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Setup => commands::schema::setup().await?,
        Commands::Reset => commands::schema::reset().await?,
        Commands::Seed => commands::seed::sample_data().await?,
        Commands::Report { report } => match report {
            ReportCommand::Summary { customer_id } => {
                commands::report::summary(customer_id).await?;
            }
            ReportCommand::History { customer_id } => {
                commands::report::history(customer_id).await?;
            }
            ReportCommand::Stats => commands::report::stats().await?,
        },
    }
    Ok(())
}
