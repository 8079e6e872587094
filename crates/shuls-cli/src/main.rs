use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "shuls")]
#[command(about = "Shuls CLI - address lookup and location selection for the shul directory", long_about = None)]
struct Cli {
    /// Server to query instead of the configured base_url
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for address candidates
    Search {
        /// Free-text address
        query: String,
    },
    /// Resolve a candidate's coordinates by place id
    Details {
        place_id: String,
    },
    /// Run the selection flow: search, pick a candidate, print the form values
    Pick {
        query: String,
        /// Zero-based position in the candidate list
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Show or initialize the configuration file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration (default)
    Show,
    /// Write the default configuration file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let context = commands::AppContext::load(cli.base_url, cli.json)?;

    match cli.command {
        Commands::Search { query } => commands::search::run(&context, &query).await?,
        Commands::Details { place_id } => commands::details::run(&context, &place_id).await?,
        Commands::Pick { query, index } => commands::pick::run(&context, &query, index).await?,
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(&context)?,
            ConfigAction::Init => commands::config::init(&context)?,
        },
    }

    Ok(())
}
