mod commands;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use jdkup::catalog::Provider;
use jdkup::config::Config;
use jdkup::error::JdkupError;
use jdkup::installer::Installer;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jdkup")]
#[command(author, version, about = "Resolve and install JDK releases from vendor catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog to query (adoptium, zulu, liberica, custom)
    #[arg(short, long, global = true)]
    provider: Option<Provider>,

    /// Install root (overrides config and JDKUP_HOME)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the recommended release of every major version
    ListRemote {
        /// Query every configured provider
        #[arg(long)]
        all: bool,
    },

    /// Show releases matching a version for this platform
    Search {
        /// Version request, e.g. 17, 17.0.5 or 8u352
        version: String,
    },

    /// Install the best release matching a version
    Install {
        /// Version request, e.g. 17, 17.0.5 or 8u352
        version: String,
    },

    /// List installed releases
    List,

    /// Print the installation root of an installed release
    Home {
        /// Installed version, e.g. 21 or 21.0.2
        version: String,
    },

    /// Remove an installed release
    Uninstall {
        /// Installed version, e.g. 21.0.2
        version: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new(default_level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    output::init_colors();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        eprintln!("  {} {}", "hint:".yellow(), e.suggestion());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<(), JdkupError> {
    let mut config = Config::load()?;
    if let Some(root) = cli.root {
        config.install_root = Some(root);
    }
    let installer = Installer::new(&config)?;
    tracing::debug!(
        "Install root {}, default provider {}",
        installer.root().display(),
        installer.default_provider()
    );

    let provider = cli.provider;
    match cli.command {
        Commands::ListRemote { all } => commands::list_remote(&installer, provider, all).await,
        Commands::Search { version } => commands::search(&installer, &version, provider).await,
        Commands::Install { version } => commands::install(&installer, &version, provider).await,
        Commands::List => commands::list(&installer),
        Commands::Home { version } => commands::home(&installer, &version),
        Commands::Uninstall { version } => commands::uninstall(&installer, &version),
    }
}
