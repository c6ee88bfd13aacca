use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use bankscan_extract::{
    Categorizer, DumpSource, ExtractPolicy, Statement, StatementExtractor,
};

/// Turn a pre-extracted bank-statement page dump into categorized
/// transactions and affordability metrics.
#[derive(Parser)]
#[command(name = "bankscan", version)]
struct Cli {
    /// Page dump produced by the PDF-extraction collaborator (JSON).
    dump: PathBuf,

    /// Category keyword table (TOML) replacing the built-in defaults.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Months covered by the statement, for monthly averages.
    #[arg(long, default_value_t = 3)]
    months: u32,

    /// Emit the full extraction result as JSON instead of a report.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let categorizer = match &cli.rules {
        Some(path) => {
            let toml = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            Categorizer::from_toml(&toml).map_err(anyhow::Error::msg)?
        }
        None => Categorizer::default(),
    };

    let policy = ExtractPolicy { reporting_months: cli.months, ..Default::default() };

    let source = DumpSource::from_path(&cli.dump)
        .with_context(|| format!("cannot load {}", cli.dump.display()))?;

    let statement = StatementExtractor::new(policy, categorizer).extract(&source)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&statement)?);
    } else {
        print_report(&statement);
    }

    Ok(())
}

fn print_report(statement: &Statement) {
    let s = &statement.summary;
    println!(
        "Found {} transactions ({})",
        statement.transaction_count, statement.extraction_method
    );
    println!();
    println!("Total income:            {:>12.2}", s.total_income);
    println!("Total expenses:          {:>12.2}", s.total_expenses);
    println!("Net income:              {:>12.2}", s.net_income);
    println!("Avg monthly income:      {:>12.2}", s.avg_monthly_income);
    println!("Avg monthly expenses:    {:>12.2}", s.avg_monthly_expenses);
    println!("Avg monthly net:         {:>12.2}", s.avg_monthly_net);
    if let Some(range) = &s.date_range {
        println!("Period:                  {range}");
    }

    println!();
    println!("Categories:");
    for (category, count) in &s.categories {
        println!("  {category}: {count} transactions");
    }

    println!();
    println!("First transactions:");
    for tx in statement.transactions.iter().take(5) {
        let desc: String = tx.description.chars().take(30).collect();
        println!("  {} | {:<30} | {:>10.2}", tx.date, desc, tx.amount);
    }
}
