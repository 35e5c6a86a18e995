// src/web/usuario_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        gerar_id,
        usuario::{Sessao, Usuario},
    },
    services::user_service,
    state::AppState,
};
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UsuarioForm {
    #[serde(default)]
    id: Option<String>,
    nome: String,
    email: String,
    // Numa edição pode vir vazia: mantém a senha gravada
    #[serde(default)]
    senha: Option<String>,
}

// GET /api/usuarios (sem senhas)
pub async fn list_usuarios(State(state): State<AppState>) -> AppResult<Json<Vec<Usuario>>> {
    let users = user_service::find_all_users(state.store()).await?;
    Ok(Json(users.iter().map(Usuario::sem_senha).collect()))
}

// GET /api/usuarios/{id}
pub async fn show_usuario(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Usuario>> {
    let usuario = user_service::find_user_by_id(state.store(), &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("usuário {}", user_id)))?;
    Ok(Json(usuario.sem_senha()))
}

// POST /api/usuarios
pub async fn save_usuario(
    State(state): State<AppState>,
    Json(form): Json<UsuarioForm>,
) -> AppResult<Json<Usuario>> {
    let id = form.id.filter(|id| !id.is_empty());
    let senha = form.senha.filter(|s| !s.is_empty());

    if form.nome.trim().is_empty() || form.email.trim().is_empty() {
        return Err(AppError::Validation("Preencha nome e e-mail.".to_string()));
    }
    // Um utilizador novo tem de trazer senha
    if id.is_none() && senha.is_none() {
        return Err(AppError::Validation("Preencha a senha.".to_string()));
    }

    let usuario = Usuario {
        id: id.unwrap_or_else(gerar_id),
        nome: form.nome,
        email: form.email,
        senha,
    };
    let resposta = usuario.sem_senha();
    user_service::save_user(state.store(), usuario).await?;
    Ok(Json(resposta))
}

// DELETE /api/usuarios/{id}
pub async fn delete_usuario(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(user_id): Path<String>,
) -> AppResult<StatusCode> {
    // Não se pode apagar o próprio registo da sessão ativa
    if sessao.id == user_id {
        tracing::warn!("'{}' tentou excluir o próprio usuário.", sessao.email);
        return Err(AppError::SelfDeletion);
    }
    user_service::delete_user(state.store(), &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
