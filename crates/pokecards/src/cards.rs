use crate::prelude::{eprintln, println, *};
use crate::fetch::{fetch_cards, FetchConfig};
use pokecards_core::cards::transform_response;
use pokecards_core::query::CardQuery;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// Where the raw card response comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Query the live API for up to `limit` cards
    Live(NonZeroU32),
    /// Read a previously captured response from disk
    Fixture(PathBuf),
}

impl Source {
    pub fn from_app(app: &crate::App) -> Result<Self> {
        match (app.limit, app.debug) {
            (Some(limit), false) => Ok(Source::Live(limit)),
            (None, true) => Ok(Source::Fixture(app.global.fixture.clone())),
            (Some(_), true) => Err(eyre!("--limit and --debug cannot be used together")),
            (None, false) => Err(eyre!("Either --limit <N> or --debug is required")),
        }
    }
}

impl From<&crate::Global> for FetchConfig {
    fn from(global: &crate::Global) -> Self {
        Self {
            base_url: global.base_url.clone(),
            api_key: global.api_key.clone(),
        }
    }
}

/// Read the debug fixture
pub async fn read_fixture(path: &Path) -> Result<String, Error> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Fixture {
            path: path.display().to_string(),
            source,
        })
}

/// Raw JSON text for the given source
pub async fn load_response(source: &Source, config: &FetchConfig) -> Result<String, Error> {
    match source {
        Source::Live(limit) => fetch_cards(config, &CardQuery::standard(*limit)).await,
        Source::Fixture(path) => {
            log::info!("Reading fixture {}", path.display());
            read_fixture(path).await
        }
    }
}

/// Load, transform and render the cards for `source`
pub async fn cards_output(source: &Source, config: &FetchConfig) -> Result<String, Error> {
    let body = load_response(source, config).await?;
    Ok(transform_response(&body)?)
}

/// Module entry point
pub async fn run(app: crate::App) -> Result<()> {
    let source = Source::from_app(&app)?;
    let config = FetchConfig::from(&app.global);

    if app.global.verbose {
        eprintln!("Card API Base: {}", config.base_url);
    }

    let output = tokio::select! {
        output = cards_output(&source, &config) => output.context("Failed to produce card output")?,
        _ = tokio::signal::ctrl_c() => {
            return Err(eyre!("Interrupted before the card response was received"));
        }
    };

    println!("{output}");

    Ok(())
}
