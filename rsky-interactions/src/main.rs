use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use rsky_interactions::build_rocket;
use rsky_interactions::config::{env_to_cfg, StoreKind};
use rsky_interactions::ledger::InteractionLedger;
use rsky_interactions::pseudonym::Pseudonymizer;
use rsky_interactions::storage::{InteractionStore, MemoryInteractionStore, PgInteractionStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[rocket::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rsky_interactions=info,rocket=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting rsky-interactions");

    let cfg = env_to_cfg();
    info!("Configuration: {:?}", cfg);

    let store: Arc<dyn InteractionStore> = match cfg.store {
        StoreKind::Postgres => {
            let store = PgInteractionStore::from_config(&cfg.database)?;
            store.init_schema().await?;
            info!("Connected to PostgreSQL");
            Arc::new(store)
        }
        StoreKind::Memory => {
            warn!("Using the in-memory store, interactions are lost on restart");
            Arc::new(MemoryInteractionStore::new())
        }
    };

    let ledger = InteractionLedger::new(
        Pseudonymizer::new(cfg.user_hash_salt.clone()),
        store,
        cfg.database.timeout,
    );

    if let Err(launch_error) = build_rocket(ledger, cfg.http_port).launch().await {
        error!("Server exited: {launch_error}");
        return Err(anyhow!("server exited with an error"));
    }
    Ok(())
}
