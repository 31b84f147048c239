mod display;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rentfair_core::{EngineConfig, UserQuote};
use rentfair_service::{LeaseQuery, RentAnalyzer};
use rentfair_source::{HttpSource, MemorySource, TransactionSource};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rentfair",
    version,
    about = "Deposit-to-rent conversion rates and quote fairness"
)]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, global = true, help = "Engine config TOML file")]
    config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "RENTFAIR_BOK_BASE_RATE",
        help = "Central-bank base rate in percent (overrides the config file)"
    )]
    bok_base_rate: Option<f64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Infer the market conversion rate for a building and unit size.
    Market {
        #[command(flatten)]
        lease: LeaseArgs,
    },
    /// Assess a deposit/rent quote against the market.
    Analyze {
        #[command(flatten)]
        lease: LeaseArgs,
        #[arg(long, help = "Quoted deposit")]
        deposit: u64,
        #[arg(long, help = "Quoted monthly rent")]
        rent: u64,
    },
}

#[derive(Args, Debug)]
struct LeaseArgs {
    #[arg(
        long,
        conflicts_with = "source_url",
        required_unless_present = "source_url",
        help = "JSON file of district transactions"
    )]
    data: Option<PathBuf>,
    #[arg(long, help = "Base URL of a transaction API")]
    source_url: Option<String>,
    #[arg(long, default_value = "Seoul")]
    city: String,
    #[arg(long)]
    district: String,
    #[arg(long, default_value = "")]
    neighborhood: String,
    #[arg(long, default_value = "")]
    building: String,
    #[arg(long, default_value_t = 0.0, help = "Exclusive area in square metres")]
    area: f64,
    #[arg(long)]
    months_back: Option<u32>,
    #[arg(long, help = "Reference date (YYYY-MM-DD), defaults to today")]
    as_of: Option<NaiveDate>,
}

impl LeaseArgs {
    fn query(&self) -> LeaseQuery {
        let as_of = self
            .as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let query = LeaseQuery::new(
            self.city.clone(),
            self.district.clone(),
            self.neighborhood.clone(),
            self.building.clone(),
            self.area,
            as_of,
        );
        match self.months_back {
            Some(m) => query.with_months_back(m),
            None => query,
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(rate) = cli.bok_base_rate {
        config.bok_base_rate = rate;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RENTFAIR_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("rentfair v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let lease = match &cli.command {
        Commands::Market { lease } | Commands::Analyze { lease, .. } => lease,
    };
    match (&lease.data, &lease.source_url) {
        (Some(path), _) => {
            let source = MemorySource::from_json_file(path)
                .with_context(|| format!("loading transactions from {}", path.display()))?;
            run(&cli, RentAnalyzer::new(source, config)).await
        }
        (None, Some(url)) => {
            let source = HttpSource::new(url.clone());
            run(&cli, RentAnalyzer::new(source, config)).await
        }
        (None, None) => anyhow::bail!("either --data or --source-url is required"),
    }
}

async fn run<S: TransactionSource>(cli: &Cli, analyzer: RentAnalyzer<S>) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Market { lease } => {
            let result = analyzer.calculate_market_rate(&lease.query()).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display::print_market_card(&result);
            }
        }
        Commands::Analyze {
            lease,
            deposit,
            rent,
        } => {
            let quote = UserQuote {
                deposit: *deposit,
                monthly_rent: *rent,
            };
            let analysis = analyzer.analyze_quote(&lease.query(), quote).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                display::print_analysis_card(&analysis);
            }
        }
    }
    Ok(())
}
