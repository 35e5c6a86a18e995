// src/services/mod.rs
pub mod analysis_service;
pub mod auth_service;
pub mod turma_service;
pub mod user_service;
pub mod vendedor_service;

/// Substitui o registo com o mesmo id ou acrescenta no fim.
pub(crate) fn upsert_by_id<T>(itens: &mut Vec<T>, novo: T, id_of: impl Fn(&T) -> &str) {
    match itens.iter().position(|item| id_of(item) == id_of(&novo)) {
        Some(index) => itens[index] = novo,
        None => itens.push(novo),
    }
}
