// src/state.rs
use crate::{services::analysis_service::AnaliseTurma, storage::KvStore};
use std::sync::Arc;

/// Estado partilhado pelos handlers: o store injetado e o colaborador de IA.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub analista: Arc<dyn AnaliseTurma>,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>, analista: Arc<dyn AnaliseTurma>) -> Self {
        Self { store, analista }
    }

    /// Atalho para passar o store às funções dos serviços.
    pub fn store(&self) -> &dyn KvStore {
        self.store.as_ref()
    }
}
