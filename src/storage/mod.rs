// src/storage/mod.rs
//! Camada de persistência chave-valor.
//!
//! Cada coleção vive inteira numa única chave como um array JSON. Ler uma chave
//! ausente ou corrompida devolve uma coleção vazia; só falhas do backend (I/O,
//! base de dados) chegam ao chamador como erro.

pub mod memory;
pub mod sqlite;

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

pub use memory::MemoryStore;
pub use sqlite::SqliteKvStore;

/// Backend de armazenamento: strings JSON indexadas por chave.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, chave: &str) -> AppResult<Option<String>>;

    async fn set(&self, chave: &str, valor: String) -> AppResult<()>;

    async fn remove(&self, chave: &str) -> AppResult<()>;

    /// Grava várias chaves de uma vez. Ou todas ficam gravadas, ou nenhuma.
    async fn set_many(&self, entradas: Vec<(&'static str, String)>) -> AppResult<()>;
}

/// As chaves fixas de cada coleção. O sufixo `_v1` marca a versão do formato;
/// não existe migração entre versões.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colecao {
    Turmas,
    Vendedores,
    Usuarios,
}

impl Colecao {
    pub fn chave(self) -> &'static str {
        match self {
            Colecao::Turmas => "app_turmas_v1",
            Colecao::Vendedores => "app_vendedores_v1",
            Colecao::Usuarios => "app_users_v1",
        }
    }
}

/// A chave existe no store (mesmo que o conteúdo esteja corrompido)?
pub async fn exists(store: &dyn KvStore, colecao: Colecao) -> AppResult<bool> {
    Ok(store.get(colecao.chave()).await?.is_some())
}

/// Lê a coleção inteira. Ausente ou ilegível conta como vazia.
pub async fn read_collection<T: DeserializeOwned>(
    store: &dyn KvStore,
    colecao: Colecao,
) -> AppResult<Vec<T>> {
    let Some(raw) = store.get(colecao.chave()).await? else {
        tracing::debug!("Coleção '{}' ainda não existe, devolvendo vazia.", colecao.chave());
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(itens) => Ok(itens),
        Err(e) => {
            tracing::warn!(
                "Coleção '{}' corrompida ({}), tratada como vazia.",
                colecao.chave(),
                e
            );
            Ok(Vec::new())
        }
    }
}

/// Serializa a coleção inteira, pronta para `set` ou `set_many`.
pub fn encode_collection<T: Serialize>(
    colecao: Colecao,
    itens: &[T],
) -> AppResult<(&'static str, String)> {
    Ok((colecao.chave(), serde_json::to_string(itens)?))
}

/// Sobrescreve a coleção inteira.
pub async fn write_collection<T: Serialize>(
    store: &dyn KvStore,
    colecao: Colecao,
    itens: &[T],
) -> AppResult<()> {
    let (chave, valor) = encode_collection(colecao, itens)?;
    tracing::debug!("Gravando {} registo(s) em '{}'.", itens.len(), chave);
    store.set(chave, valor).await
}
