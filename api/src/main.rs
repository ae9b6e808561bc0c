use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use eventbook_api::{config::EventbookApiConfig, schema, server};
use eventbook_db::storage::{Storage, mongodb::MongoDBStorage};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = EventbookApiConfig::parse();

    if config.dump_openapi {
        match server::openapi().to_pretty_json() {
            Ok(json) => print!("{}", json),
            Err(e) => {
                eprintln!("Failed to render OpenAPI document: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if config.dump_schema {
        print!("{}", schema::sdl());
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or("eventbook_api=info,eventbook_db=info".into()),
        )
        .pretty()
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: EventbookApiConfig) -> anyhow::Result<()> {
    let store_config = config.store_config();
    info!(database = ?store_config.database, "Connecting to MongoDB");

    let db = MongoDBStorage::connect(&store_config).await?;
    db.ping().await?;
    info!("MongoDB is reachable");

    let db: Arc<dyn Storage> = Arc::new(db);
    let (router, _api) = server::make(&config, db)?;

    let listener = TcpListener::bind(config.bind_addr).await?;

    info!("Listening on http://{:?}", config.bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
