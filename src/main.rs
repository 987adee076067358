use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use quizapp::graphql::operations;
use quizapp::ClientConfig;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// TOML file with client settings
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
    /// Base URL of the quiz API, overriding config and environment
    #[clap(long, global = true)]
    api_url: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the quiz template console
    Console,
    /// List the GraphQL operations this client issues
    Operations {
        /// Print the document of one operation
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Console => {
            let config = load_config(&args.config, &args.api_url)?;
            run_console(config).await?;
        }
        Commands::Operations { name } => match name {
            Some(name) => {
                let info = operations::find(&name)
                    .ok_or_else(|| anyhow!("Unknown operation: {}", name))?;
                println!("{}", info.document.trim());
            }
            None => {
                for info in operations::catalog() {
                    println!(
                        "{:<20} {:<9} {:<7} {}",
                        info.name,
                        info.kind,
                        info.scope,
                        info.refetch.join(", ")
                    );
                }
            }
        },
    }

    Ok(())
}

fn load_config(path: &Option<PathBuf>, api_url: &Option<String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path.as_deref()).context("loading configuration")?;
    if let Some(api_url) = api_url {
        config = config.with_api_url(api_url.clone());
        config.validate().context("validating --api-url")?;
    }
    info!("Using API at {}", config.api_url);
    Ok(config)
}

#[cfg(feature = "console")]
async fn run_console(config: ClientConfig) -> Result<()> {
    let app = quizapp::App::connect(&config).context("building HTTP client")?;
    quizapp::console::run_console(app).await
}

#[cfg(not(feature = "console"))]
async fn run_console(_config: ClientConfig) -> Result<()> {
    Err(anyhow!("built without the `console` feature"))
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_deref()
        .unwrap_or("info")
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "hyper=off,reqwest=warn,rustyline=warn,{}",
            log_level
        )))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
