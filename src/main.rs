use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kabuto::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kabuto")]
#[command(about = "A Rust-based signal-driven backtesting engine for equities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a backtest over a signal csv
    Run {
        //path to signal csv data file
        #[arg(long)]
        data: PathBuf,

        //decision rule (trend_count, count_only, ud_ratio)
        #[arg(long)]
        rule: String,

        //initial capital
        #[arg(long, default_value = "1000")]
        initial_amount: f64,

        //fixed transaction cost per order
        #[arg(long, default_value = "0.0")]
        fixed_cost: f64,

        //proportional transaction cost per order
        #[arg(long, default_value = "0.0")]
        prop_cost: f64,

        //print every trade as it happens
        #[arg(long)]
        verbose: bool,

        //output path for the return log csv
        #[arg(long)]
        output_returns: Option<PathBuf>,
    },

    //derive signal columns from a raw price/volume csv
    Derive {
        //path to raw price csv data file
        #[arg(long)]
        data: PathBuf,

        //output path for the signal csv
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            rule,
            initial_amount,
            fixed_cost,
            prop_cost,
            verbose,
            output_returns,
        } => {
            run_backtest(
                data,
                rule,
                initial_amount,
                fixed_cost,
                prop_cost,
                verbose,
                output_returns,
            )?;
        }
        Commands::Derive { data, output } => {
            derive_signal_file(data, output)?;
        }
    }

    Ok(())
}

fn run_backtest(
    data_path: PathBuf,
    rule_name: String,
    initial_amount: f64,
    fixed_cost: f64,
    prop_cost: f64,
    verbose: bool,
    output_returns: Option<PathBuf>,
) -> Result<()> {
    println!("Kabuto Equity Backtesting Engine");
    println!("=================================\n");

    //load data
    println!("Loading data from {:?}...", data_path);
    let bars = load_signal_csv(&data_path)
        .context(format!("Failed to load data from {:?}", data_path))?;

    if bars.is_empty() {
        anyhow::bail!("No bars found in {:?}", data_path);
    }

    let data = group_by_code(&bars);
    println!(
        "Loaded {} bars across {} instruments\n",
        bars.len(),
        data.len()
    );

    //create rule
    let rule_kind = RuleKind::parse(&rule_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown rule: {}", rule_name))?;
    let rule = rule_kind.build();

    println!("Rule: {}", rule.name());
    println!("Initial amount: {:.2}", initial_amount);
    println!("Fixed cost: {:.2} per order", fixed_cost);
    println!("Proportional cost: {:.4} per order\n", prop_cost);

    //create run config
    let config = RunConfig {
        initial_amount,
        fixed_cost,
        proportional_cost: prop_cost,
        rule: rule_kind,
        verbose,
        output_returns_csv: output_returns.clone(),
    };

    //run backtest
    println!("Running backtest...\n");
    let result = Runner::new(&config).run(rule.as_ref(), &data);

    //display results
    println!("Backtest Results");
    println!("================\n");
    result.summary.pretty_print_table();

    //save return log if requested
    if let Some(returns_path) = output_returns {
        save_returns_csv(&result.returns, &returns_path)?;
        println!("\nReturn log saved to {:?}", returns_path);
    }

    Ok(())
}

fn derive_signal_file(data_path: PathBuf, output_path: PathBuf) -> Result<()> {
    println!("Loading prices from {:?}...", data_path);
    let prices = load_price_csv(&data_path)
        .context(format!("Failed to load data from {:?}", data_path))?;

    if prices.is_empty() {
        anyhow::bail!("No bars found in {:?}", data_path);
    }

    let grouped = group_prices_by_code(&prices);
    println!(
        "Loaded {} bars across {} instruments",
        prices.len(),
        grouped.len()
    );

    //derive per instrument, preserving instrument order
    let mut signals = Vec::with_capacity(prices.len());
    for (code, series) in &grouped {
        signals.extend(derive_signals(code, series));
    }

    save_signal_csv(&signals, &output_path)?;
    println!("Signal file saved to {:?}", output_path);

    Ok(())
}
