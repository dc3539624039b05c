mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{AnalyzeLoanArgs, PaymentArgs, TermArgs};
use commands::offers::ValidateOffersArgs;
use commands::savings::SavingsArgs;

/// Green credit amortization, offer correction and savings
#[derive(Parser)]
#[command(
    name = "gcx",
    version,
    about = "Green credit amortization, offer correction and savings",
    long_about = "A CLI for fixed-rate green credit calculations with decimal precision. \
                  Computes level monthly payments, the term implied by a fixed payment, \
                  corrects generated credit offers against term policy, and aggregates \
                  money, CO2 and water savings from accepted credits."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (logs go to stderr)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Level monthly payment for a principal, rate and term
    Payment(PaymentArgs),
    /// Whole months a fixed payment needs to retire a loan
    Term(TermArgs),
    /// Totals, interest and payment headroom for a loan at its stated term
    AnalyzeLoan(AnalyzeLoanArgs),
    /// Correct offer terms and drop offers that cannot amortize within policy
    ValidateOffers(ValidateOffersArgs),
    /// Aggregate money, CO2 and water savings from accepted credits
    Savings(SavingsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(2);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Term(args) => commands::loan::run_term(args),
        Commands::AnalyzeLoan(args) => commands::loan::run_analyze_loan(args),
        Commands::ValidateOffers(args) => commands::offers::run_validate_offers(args),
        Commands::Savings(args) => commands::savings::run_savings(args),
        Commands::Version => {
            println!("gcx {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
