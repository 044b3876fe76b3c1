use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use liquidity_predictor::shell::run_session;
use liquidity_predictor::{ArtifactStore, PredictionPipeline};
use log::info;
use market_input::config::AppConfig;
use market_input::form::InputForm;
use market_input::logger::init_logger;
use market_input::{RawInputs, validate_inputs};

#[derive(Parser)]
#[command(name = "liquidity_predictor", version, about = "Predict a cryptocurrency's liquidity ratio and stability class")]
struct Cli {
    /// TOML configuration file (defaults to ./liquidity.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Predict once from command-line values
    Predict(PredictArgs),
    /// Fill in the form repeatedly on the terminal (default)
    Interactive,
}

#[derive(Args)]
struct PredictArgs {
    /// 1h % change, as a decimal
    #[arg(long, allow_hyphen_values = true)]
    one_h: Option<f64>,

    /// 24h % change, as a decimal
    #[arg(long, allow_hyphen_values = true)]
    twenty_four_h: Option<f64>,

    /// 7d % change, as a decimal
    #[arg(long, allow_hyphen_values = true)]
    seven_d: Option<f64>,

    /// 24h volume in USD
    #[arg(long, allow_hyphen_values = true)]
    volume: Option<f64>,

    /// Market cap in USD
    #[arg(long, allow_hyphen_values = true)]
    market_cap: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl PredictArgs {
    fn inputs(&self, defaults: RawInputs) -> RawInputs {
        RawInputs {
            one_h_change: self.one_h.unwrap_or(defaults.one_h_change),
            twenty_four_h_change: self.twenty_four_h.unwrap_or(defaults.twenty_four_h_change),
            seven_d_change: self.seven_d.unwrap_or(defaults.seven_d_change),
            volume_usd: self.volume.unwrap_or(defaults.volume_usd),
            market_cap_usd: self.market_cap.unwrap_or(defaults.market_cap_usd),
        }
    }
}

fn predict_once(pipeline: &PredictionPipeline, args: &PredictArgs, defaults: RawInputs) -> Result<()> {
    let inputs = args.inputs(defaults);
    validate_inputs(&inputs);

    let output = pipeline
        .evaluate(&inputs)
        .context("Error during prediction")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{output}");
    }
    Ok(())
}

fn interactive(pipeline: &PredictionPipeline, defaults: RawInputs) -> Result<()> {
    println!("Cryptocurrency Liquidity Predictor");
    println!("Enter market data to predict liquidity ratio and classify market stability.");
    println!("Press Enter to keep a value, 'q' to quit.\n");

    let stdin = io::stdin();
    let mut form = InputForm::new(stdin.lock(), io::stdout(), defaults);
    let summary = run_session(pipeline, &mut form)?;

    info!(
        "Session ended after {} submissions ({} failed)",
        summary.submissions, summary.failed
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logger(&config.log_level);

    let store = ArtifactStore::load(&config.artifacts).context("Failed to load model artifacts")?;
    let pipeline = PredictionPipeline::from_store(store);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Predict(args) => predict_once(&pipeline, &args, config.form),
        Command::Interactive => interactive(&pipeline, config.form),
    }
}
