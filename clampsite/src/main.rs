use anyhow::Context;
use clampsite::commands::{email::EmailCommand, search::search, serve::serve};
use clampsite_utils::clampsite_version;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = clampsite_config::load().context("Failed to load config")?;

    match cli.command {
        Command::Serve => serve(config).await?,
        Command::Search { query } => search(config, &query.join(" "))?,
        Command::Email { command } => command.invoke(config).await?,
        Command::CheckConfig { verbose } => {
            config.catalog().context("Invalid search catalog")?;
            let relay_settings = config
                .relay_settings()
                .context("Contact relay is not configured")?;
            if verbose {
                println!("{config:#?}");
                println!("{relay_settings:#?}");
            }
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = clampsite_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the REST API server for the contact relay and page search
    #[command(aliases(["run", "start", "r", "s"]))]
    Serve,
    /// Search the page catalog
    #[command(aliases(["find", "f"]))]
    Search {
        /// The search query, multiple words are joined with spaces
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Test email deliverability
    #[command(aliases(["e"]))]
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Validate configuration, including the contact relay settings
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}
