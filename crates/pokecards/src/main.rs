use crate::prelude::*;
use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;

mod cards;
mod error;
mod fetch;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Fetch rare fire and grass Pokémon TCG cards with at least 90 HP and print them as {\"Cards\": [...]} JSON"
)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["limit", "debug"])
))]
pub struct App {
    /// Number of cards to fetch from the live API
    #[arg(long, value_name = "N")]
    pub limit: Option<NonZeroU32>,

    /// Read the fixture file instead of calling the API
    #[arg(long)]
    pub debug: bool,

    #[clap(flatten)]
    pub global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Card API base URL
    #[clap(long, env = "POKECARDS_API_BASE", default_value = fetch::DEFAULT_API_BASE)]
    pub base_url: String,

    /// Pokémon TCG API key (optional, raises the rate limit)
    #[clap(long, env = "POKEMONTCG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Response fixture read by --debug
    #[clap(long, env = "POKECARDS_FIXTURE", default_value = "fixtures/cards.json")]
    pub fixture: PathBuf,

    /// Whether to display additional information.
    #[clap(long, env = "POKECARDS_VERBOSE", default_value = "false")]
    pub verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = match App::try_parse() {
        Ok(app) => app,
        Err(err) => {
            // Usage errors exit with 1; --help and --version exit cleanly.
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    init_logging(app.global.verbose);
    color_eyre::install()?;

    crate::cards::run(app)
        .await
        .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
