use clap::Parser;
use rust_gacha::{Formula, PullContext, WeightTable};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Type a KeyLang formula per line to see the weights and odds it gives.
#[derive(Parser, Debug)]
#[command(name = "repl", version)]
struct Cli {
    /// Rarities to weigh each formula against
    #[arg(short, long, value_delimiter = ',', default_values_t = [1.0, 2.0, 3.0, 4.0, 5.0])]
    rarity: Vec<f64>,

    /// Simulated pulls per formula
    #[arg(short, long, default_value_t = 0)]
    pulls: usize,

    /// Seed for simulated pulls
    #[arg(short, long)]
    seed: Option<u64>,
}

fn report(formula: &Formula, cli: &Cli) -> rust_gacha::Result<()> {
    println!("parsed: {}", formula.root());

    let table = WeightTable::compute(formula, &cli.rarity)?;
    for ((rarity, weight), p) in cli
        .rarity
        .iter()
        .zip(table.weights())
        .zip(table.probabilities())
    {
        println!("  R = {:<8} weight = {:<12} odds = {:.4}%", rarity, weight, p * 100.0);
    }

    if cli.pulls > 0 {
        let mut counts = vec![0usize; cli.rarity.len()];
        match cli.seed {
            Some(seed) => {
                let mut ctx = PullContext::seeded(seed);
                (0..cli.pulls).for_each(|_| counts[ctx.draw(&table)] += 1);
            }
            None => {
                let mut ctx = PullContext::default();
                (0..cli.pulls).for_each(|_| counts[ctx.draw(&table)] += 1);
            }
        }
        println!("  {} pulls:", cli.pulls);
        for (rarity, count) in cli.rarity.iter().zip(counts) {
            println!("  R = {:<8} pulled {} times", rarity, count);
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_gacha=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if !line.trim().is_empty() {
            match Formula::compile(line).and_then(|f| report(&f, &cli)) {
                Ok(()) => {}
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
