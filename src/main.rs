use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod build;
mod commands;
mod config;
mod llm;
mod util;

#[derive(Parser)]
#[command(version, about = "Generate a complete single-page website from a description")]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: SitewrightCommand,

    /// The path to the configuration file
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// What the website is for (asked for interactively if omitted)
    #[arg(short, long)]
    description: Option<String>,

    /// Ask for every option interactively
    #[arg(short, long, default_value = "false")]
    interactive: bool,

    /// The kind of website: business, portfolio, landing, blog or saas
    #[arg(short = 't', long = "type", default_value = "business")]
    website_type: String,

    /// The visual style: modern, minimal, bold, elegant or playful
    #[arg(short, long, default_value = "modern")]
    style: String,

    /// Project directory name (derived from the description if omitted)
    #[arg(short, long)]
    name: Option<String>,

    /// Skip the review stage
    #[arg(long, default_value = "false")]
    skip_review: bool,

    /// Serve the generated site when done
    #[arg(long, default_value = "false")]
    preview: bool,

    /// Don't open the browser when previewing
    #[arg(long, default_value = "false")]
    no_open: bool,
}

#[derive(Parser)]
struct PreviewArgs {
    /// Project directory (or a file inside it); defaults to the output directory
    path: Option<PathBuf>,

    /// The first port to try
    #[arg(short, long)]
    port: Option<u16>,

    /// Don't open the browser
    #[arg(long, default_value = "false")]
    no_open: bool,
}

#[derive(Subcommand)]
enum SitewrightCommand {
    /// Write a default sitewright.yaml
    Init(InitArgs),

    /// Generate a website
    Build(BuildArgs),

    /// Serve a generated website on a local port
    Preview(PreviewArgs),

    /// Show the effective configuration
    Config,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = if verbose { "warn,sitewright=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // A missing .env is fine; the environment or config file may carry the key
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose);

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let config_file = args.config_file.as_deref();

    match args.command {
        SitewrightCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        SitewrightCommand::Build(args) => {
            commands::build::run(&args, config_file).await?;
        }
        SitewrightCommand::Preview(args) => {
            commands::preview::run(&args, config_file).await?;
        }
        SitewrightCommand::Config => {
            commands::config::run(config_file)?;
        }
    }

    Ok(())
}
