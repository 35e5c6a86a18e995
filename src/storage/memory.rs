// src/storage/memory.rs
use super::KvStore;
use crate::error::AppResult;
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

/// Store volátil em memória. Usado nos testes e quando não se quer ficheiro.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entradas: Arc<Mutex<HashMap<String, String>>>,
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, chave: &str) -> AppResult<Option<String>> {
        Ok(self.entradas.lock().await.get(chave).cloned())
    }

    async fn set(&self, chave: &str, valor: String) -> AppResult<()> {
        self.entradas.lock().await.insert(chave.to_string(), valor);
        Ok(())
    }

    async fn remove(&self, chave: &str) -> AppResult<()> {
        self.entradas.lock().await.remove(chave);
        Ok(())
    }

    async fn set_many(&self, entradas: Vec<(&'static str, String)>) -> AppResult<()> {
        // Um único lock para o lote inteiro
        let mut guard = self.entradas.lock().await;
        for (chave, valor) in entradas {
            guard.insert(chave.to_string(), valor);
        }
        Ok(())
    }
}
