// src/services/user_service.rs
use crate::{
    error::AppResult,
    models::usuario::Usuario,
    services::upsert_by_id,
    storage::{self, Colecao, KvStore},
};

// Administrador criado no primeiro arranque (quando a chave de usuários não existe)
pub const ADMIN_PADRAO_ID: &str = "1";
pub const ADMIN_PADRAO_NOME: &str = "Administrador";
pub const ADMIN_PADRAO_EMAIL: &str = "admin@turmas.local";
pub const ADMIN_PADRAO_SENHA: &str = "Admin2011*";

fn admin_padrao() -> Usuario {
    Usuario {
        id: ADMIN_PADRAO_ID.to_string(),
        nome: ADMIN_PADRAO_NOME.to_string(),
        email: ADMIN_PADRAO_EMAIL.to_string(),
        senha: Some(ADMIN_PADRAO_SENHA.to_string()),
    }
}

/// Cria o administrador padrão se a coleção de usuários nunca foi gravada.
/// Uma coleção existente mas vazia não é semeada de novo.
pub async fn seed_users(store: &dyn KvStore) -> AppResult<()> {
    if storage::exists(store, Colecao::Usuarios).await? {
        return Ok(());
    }
    tracing::info!("🌱 Coleção de usuários ausente, criando administrador padrão.");
    storage::write_collection(store, Colecao::Usuarios, &[admin_padrao()]).await
}

/// Busca todos os utilizadores (com senha; quem expõe na API remove-a).
pub async fn find_all_users(store: &dyn KvStore) -> AppResult<Vec<Usuario>> {
    seed_users(store).await?;
    let users: Vec<Usuario> = storage::read_collection(store, Colecao::Usuarios).await?;
    tracing::debug!("Encontrados {} utilizadores.", users.len());
    Ok(users)
}

pub async fn find_user_by_id(store: &dyn KvStore, user_id: &str) -> AppResult<Option<Usuario>> {
    let users = find_all_users(store).await?;
    Ok(users.into_iter().find(|u| u.id == user_id))
}

/// Insere ou substitui pelo id. Numa edição sem senha, mantém a senha gravada.
pub async fn save_user(store: &dyn KvStore, mut usuario: Usuario) -> AppResult<()> {
    let mut users = find_all_users(store).await?;

    if usuario.senha.as_deref().map_or(true, str::is_empty) {
        usuario.senha = users
            .iter()
            .find(|u| u.id == usuario.id)
            .and_then(|u| u.senha.clone());
    }

    tracing::info!("Gravando utilizador '{}' ({}).", usuario.id, usuario.email);
    upsert_by_id(&mut users, usuario, |u| u.id.as_str());
    storage::write_collection(store, Colecao::Usuarios, &users).await
}

/// Remove pelo id. Não verifica a sessão ativa: isso fica a cargo de quem chama.
pub async fn delete_user(store: &dyn KvStore, user_id: &str) -> AppResult<()> {
    let users: Vec<Usuario> = find_all_users(store)
        .await?
        .into_iter()
        .filter(|u| u.id != user_id)
        .collect();
    tracing::info!("Utilizador '{}' removido.", user_id);
    storage::write_collection(store, Colecao::Usuarios, &users).await
}
