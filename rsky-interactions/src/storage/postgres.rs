use super::InteractionStore;
use crate::config::DatabaseConfig;
use crate::error::StorageError;
use crate::models::{Interaction, InteractionWrite};
use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime, Timeouts};
use std::collections::BTreeMap;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, info};

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS interactions (
    id SERIAL PRIMARY KEY,
    user_alias TEXT NOT NULL,
    post_id TEXT NOT NULL,
    action_type TEXT NOT NULL,
    context JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    CONSTRAINT unique_user_post_action UNIQUE (user_alias, post_id, action_type)
);
CREATE INDEX IF NOT EXISTS idx_interactions_context ON interactions USING GIN (context);
CREATE INDEX IF NOT EXISTS idx_interactions_post_id ON interactions (post_id);

CREATE TABLE IF NOT EXISTS privacy_settings (
    user_id TEXT PRIMARY KEY,
    tracking_level TEXT CHECK (tracking_level IN ('full', 'limited', 'none')) DEFAULT 'full'
);
"#;

const DELETE_CONFLICTING: &str = r#"DELETE FROM interactions
   WHERE user_alias = $1 AND post_id = $2 AND action_type = $3"#;

const UPSERT_INTERACTION: &str = r#"INSERT INTO interactions (user_alias, post_id, action_type, context)
   VALUES ($1, $2, $3, $4)
   ON CONFLICT ON CONSTRAINT unique_user_post_action DO UPDATE SET
       context = EXCLUDED.context,
       created_at = CURRENT_TIMESTAMP
   RETURNING id"#;

const SELECT_COLUMNS: &str = "id, user_alias, post_id, action_type, context, created_at";

/// Interaction table backed by PostgreSQL through a deadpool connection pool.
#[derive(Clone)]
pub struct PgInteractionStore {
    pool: Pool,
}

impl PgInteractionStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Build the pool. Connections are opened lazily, so this does not touch
    /// the database.
    pub fn from_config(cfg: &DatabaseConfig) -> Result<Self, StorageError> {
        let mut pg_config = Config::new();
        match &cfg.url {
            Some(url) => pg_config.url = Some(url.clone()),
            None => {
                pg_config.dbname = Some(cfg.dbname.clone());
                pg_config.user = Some(cfg.user.clone());
                pg_config.password = Some(cfg.password.clone());
                pg_config.host = Some(cfg.host.clone());
                pg_config.port = Some(cfg.port);
            }
        }
        pg_config.connect_timeout = Some(cfg.timeout);
        pg_config.options = Some(format!(
            "-c statement_timeout={}",
            cfg.timeout.as_millis()
        ));
        pg_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        pg_config.pool = Some(PoolConfig {
            max_size: cfg.pool_max_size,
            timeouts: Timeouts {
                wait: Some(cfg.timeout),
                create: Some(cfg.timeout),
                recycle: Some(cfg.timeout),
            },
            ..Default::default()
        });

        let pool = pg_config.create_pool(Some(Runtime::Tokio1), NoTls)?;
        info!(
            "PostgreSQL pool configured: max_size={}, timeout={:?}",
            cfg.pool_max_size, cfg.timeout
        );
        Ok(Self::new(pool))
    }

    /// Create tables and indexes if they are missing.
    pub async fn init_schema(&self) -> Result<(), StorageError> {
        let client = self.pool.get().await?;
        client.batch_execute(SCHEMA).await?;
        info!("Interaction schema ready");
        Ok(())
    }

    /// Advisory lock id for a (user_alias, post_id) pair.
    fn hash_lock_key(user_alias: &str, post_id: &str) -> i64 {
        let mut hash: i64 = 0;
        for byte in user_alias.bytes().chain(std::iter::once(b':')).chain(post_id.bytes()) {
            hash = hash.wrapping_mul(31).wrapping_add(byte as i64);
        }
        hash
    }

    async fn select_where(
        &self,
        predicate: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<Interaction>, StorageError> {
        let client = self.pool.get().await?;
        let query = format!("SELECT {SELECT_COLUMNS} FROM interactions WHERE {predicate} ORDER BY id");
        let rows = client.query(query.as_str(), params).await?;
        rows.iter().map(row_to_interaction).collect()
    }
}

fn row_to_interaction(row: &Row) -> Result<Interaction, StorageError> {
    Ok(Interaction {
        id: row.try_get("id")?,
        user_alias: row.try_get("user_alias")?,
        post_id: row.try_get("post_id")?,
        action_type: row.try_get("action_type")?,
        context: row.try_get("context")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl InteractionStore for PgInteractionStore {
    async fn record(&self, write: &InteractionWrite) -> Result<i32, StorageError> {
        let mut client = self.pool.get().await?;

        // Dropping the transaction without commit rolls it back
        let txn = client.transaction().await?;

        if let Some(conflicting) = &write.conflicting_action {
            // Serializes opposing writers on the same (user, post) so exactly
            // one of the pair survives. Released at transaction end.
            let lock_id = Self::hash_lock_key(&write.user_alias, &write.post_id);
            txn.execute("SELECT pg_advisory_xact_lock($1)", &[&lock_id])
                .await?;

            let deleted = txn
                .execute(
                    DELETE_CONFLICTING,
                    &[&write.user_alias, &write.post_id, conflicting],
                )
                .await?;
            if deleted > 0 {
                debug!(
                    "Removed conflicting {conflicting} for post {}",
                    write.post_id
                );
            }
        }

        let row = txn
            .query_one(
                UPSERT_INTERACTION,
                &[
                    &write.user_alias,
                    &write.post_id,
                    &write.action_type,
                    &write.context,
                ],
            )
            .await?;
        let id: i32 = row.try_get(0)?;

        txn.commit().await?;
        Ok(id)
    }

    async fn interactions_for_post(&self, post_id: &str) -> Result<Vec<Interaction>, StorageError> {
        self.select_where("post_id = $1", &[&post_id]).await
    }

    async fn interactions_for_user(
        &self,
        user_alias: &str,
    ) -> Result<Vec<Interaction>, StorageError> {
        self.select_where("user_alias = $1", &[&user_alias]).await
    }

    async fn interactions_for_user_action(
        &self,
        user_alias: &str,
        action_type: &str,
    ) -> Result<Vec<Interaction>, StorageError> {
        self.select_where(
            "user_alias = $1 AND action_type = $2",
            &[&user_alias, &action_type],
        )
        .await
    }

    async fn action_counts(
        &self,
        context_key: &str,
        value: &str,
    ) -> Result<BTreeMap<String, i64>, StorageError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"SELECT action_type, COUNT(*) FROM interactions
                   WHERE context->>($1::text) = $2
                   GROUP BY action_type"#,
                &[&context_key, &value],
            )
            .await?;

        let mut counts = BTreeMap::new();
        for row in rows {
            let action_type: String = row.try_get(0)?;
            let count: i64 = row.try_get(1)?;
            counts.insert(action_type, count);
        }
        Ok(counts)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let client = self.pool.get().await?;
        client.query_one("SELECT 1", &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_to_cfg;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_lock_key_is_stable_per_pair() {
        let a = PgInteractionStore::hash_lock_key("alias", "post");
        assert_eq!(a, PgInteractionStore::hash_lock_key("alias", "post"));
        assert_ne!(a, PgInteractionStore::hash_lock_key("alias", "other"));
        // The separator keeps shifted splits apart
        assert_ne!(
            PgInteractionStore::hash_lock_key("ab", "c"),
            PgInteractionStore::hash_lock_key("a", "bc")
        );
    }

    async fn live_store() -> PgInteractionStore {
        let store = PgInteractionStore::from_config(&env_to_cfg().database).unwrap();
        store.init_schema().await.unwrap();
        store
    }

    fn write(post_id: &str, action_type: &str, conflicting: Option<&str>) -> InteractionWrite {
        InteractionWrite {
            user_alias: "pg-test-alias".to_string(),
            post_id: post_id.to_string(),
            action_type: action_type.to_string(),
            context: json!({"feed_id": post_id}),
            conflicting_action: conflicting.map(String::from),
        }
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL (DATABASE_URL or DB_* variables)
    async fn test_upsert_and_conflict_against_postgres() {
        let store = live_store().await;
        let post_id = format!("pg-test-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default());

        let first = store.record(&write(&post_id, "favorite", None)).await.unwrap();
        let second = store.record(&write(&post_id, "favorite", None)).await.unwrap();
        assert_eq!(first, second);

        store
            .record(&write(&post_id, "more_like_this", Some("less_like_this")))
            .await
            .unwrap();
        store
            .record(&write(&post_id, "less_like_this", Some("more_like_this")))
            .await
            .unwrap();

        let rows = store.interactions_for_post(&post_id).await.unwrap();
        let actions: Vec<&str> = rows.iter().map(|r| r.action_type.as_str()).collect();
        assert_eq!(actions, vec!["favorite", "less_like_this"]);

        let counts = store.action_counts("feed_id", &post_id).await.unwrap();
        assert_eq!(counts.get("favorite"), Some(&1));
        assert_eq!(counts.get("less_like_this"), Some(&1));
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL (DATABASE_URL or DB_* variables)
    async fn test_opposing_writers_leave_one_row() {
        let store = Arc::new(live_store().await);
        let post_id = format!("pg-race-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default());

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            let post_id = post_id.clone();
            handles.push(tokio::spawn(async move {
                let (action, conflicting) = if i % 2 == 0 {
                    ("more_like_this", "less_like_this")
                } else {
                    ("less_like_this", "more_like_this")
                };
                store
                    .record(&write(&post_id, action, Some(conflicting)))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let rows = store.interactions_for_post(&post_id).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
