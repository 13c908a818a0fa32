use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod config;
mod extractor;
mod lookup;
mod output;
mod parse;
mod render;
mod telemetry;

#[derive(Parser)]
#[command(name = "deutsch", about = "German conjugation and declension lookup via verbformen.de")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(flatten)]
    config: config::ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look a word up on the reference site and print the reply
    #[command(alias = "search")]
    Lookup(lookup::LookupCmd),
    /// Parse a saved reference page offline
    Parse(parse::ParseCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and DEUTSCH_LOG_FORMAT
    telemetry::config::init_tracing();
    let cfg = config::LookupConfig::from_env_and_args(&cli.config)?;

    match cli.command {
        Commands::Lookup(args) => lookup::run(&cfg, args).await?,
        Commands::Parse(args) => parse::run(&cfg, args)?,
    }

    Ok(())
}
