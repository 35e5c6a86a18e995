// src/storage/sqlite.rs
use super::KvStore;
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::SqlitePool;

const SELECT_SQL: &str = "SELECT valor FROM kv_store WHERE chave = ?1";

const UPSERT_SQL: &str = r#"
    INSERT INTO kv_store (chave, valor) VALUES (?1, ?2)
    ON CONFLICT(chave) DO UPDATE SET
        valor = excluded.valor,
        updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
"#;

const DELETE_SQL: &str = "DELETE FROM kv_store WHERE chave = ?1";

/// Store persistente: uma tabela `kv_store` com uma linha por coleção.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for SqliteKvStore {
    async fn get(&self, chave: &str) -> AppResult<Option<String>> {
        let valor = sqlx::query_scalar::<_, String>(SELECT_SQL)
            .bind(chave)
            .fetch_optional(&self.pool)
            .await?;
        Ok(valor)
    }

    async fn set(&self, chave: &str, valor: String) -> AppResult<()> {
        sqlx::query(UPSERT_SQL)
            .bind(chave)
            .bind(valor)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove(&self, chave: &str) -> AppResult<()> {
        let rows_affected = sqlx::query(DELETE_SQL)
            .bind(chave)
            .execute(&self.pool)
            .await?
            .rows_affected();
        tracing::debug!("Chave '{}' removida ({} linha(s)).", chave, rows_affected);
        Ok(())
    }

    async fn set_many(&self, entradas: Vec<(&'static str, String)>) -> AppResult<()> {
        // Transação: se uma escrita falhar, as anteriores são desfeitas
        let mut tx = self.pool.begin().await?;
        for (chave, valor) in entradas {
            sqlx::query(UPSERT_SQL)
                .bind(chave)
                .bind(valor)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
