// src/models/mod.rs
pub mod turma;
pub mod usuario;
pub mod vendedor;

use uuid::Uuid;

/// Gera um identificador curto (9 caracteres hex) para novos registos.
pub fn gerar_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id
}
