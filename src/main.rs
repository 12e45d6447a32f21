use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hirescout::config::{Command, Config, LogFormat};
use hirescout::models::candidate::Candidate;
use hirescout::models::job::Job;
use hirescout::routes::{self, AppState};
use hirescout::store::{MemoryStore, PgStore, RecordStore};
use hirescout::{Aggregator, PdfTextExtractor, Portal, TextExtractor, db, documents};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hirescout=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

type Stores = (Arc<dyn RecordStore<Candidate>>, Arc<dyn RecordStore<Job>>);

async fn open_stores(config: &Config) -> anyhow::Result<Stores> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, records are kept in memory only");
        let candidates: Arc<dyn RecordStore<Candidate>> = Arc::new(MemoryStore::<Candidate>::new());
        let jobs: Arc<dyn RecordStore<Job>> = Arc::new(MemoryStore::<Job>::new());
        return Ok((candidates, jobs));
    };

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url).await?;

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        db::run_migrations(&pool).await?;
        tracing::info!("Migrations complete");
    }

    let store = PgStore::new(pool);
    let candidates: Arc<dyn RecordStore<Candidate>> = Arc::new(store.clone());
    let jobs: Arc<dyn RecordStore<Job>> = Arc::new(store);
    Ok((candidates, jobs))
}

fn build_aggregator(config: &Config) -> anyhow::Result<Aggregator> {
    Ok(Aggregator::live()?.with_timeout(config.adapter_timeout()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_format);

    match config.resolved_command() {
        Command::Serve {
            listen_addr,
            upload_limit_bytes,
        } => {
            let (candidates, jobs) = open_stores(&config).await?;
            let state = AppState {
                aggregator: Arc::new(build_aggregator(&config)?),
                extractor: Arc::new(PdfTextExtractor),
                candidates,
                jobs,
            };
            let app = routes::app(state, upload_limit_bytes);

            let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
            tracing::info!("Listening on {listen_addr}");
            axum::serve(listener, app).await?;
        }
        Command::Search { query, sites } => {
            let aggregator = build_aggregator(&config)?;
            let sites = if sites.is_empty() {
                aggregator.portals()
            } else {
                sites
                    .iter()
                    .map(|s| s.parse::<Portal>())
                    .collect::<Result<Vec<_>, _>>()?
            };
            let outcome = aggregator.search(&query, &sites).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Parse { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let text = PdfTextExtractor.extract_text(&bytes)?;
            let profile = documents::extract_profile(&text);
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }

    Ok(())
}
