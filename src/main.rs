use btc_ticker::cli::{describe_config, Cli, Commands};
use btc_ticker::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!(
            "Warning: Could not load config from {}: {}",
            cli.config.display(),
            e
        );
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = btc_ticker::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!(endpoint = %config.ticker.endpoint, "Starting BTC ticker");
            args.execute(config, cli.config).await?;
        }
        Commands::Once(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            print!("{}", describe_config(&config)?);
        }
    }

    Ok(())
}
