// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{LoginForm, Sessao},
    services::auth_service,
    state::AppState,
};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use tower_sessions::Session;

// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> AppResult<Json<Sessao>> {
    tracing::info!("Tentativa de login para: {}", form.email);

    if !auth_service::login(state.store(), &session, &form.email, &form.senha).await? {
        return Err(AppError::InvalidCredentials);
    }

    // Acabou de ser gravada; se não se conseguir ler, algo correu muito mal
    auth_service::current_user(&session)
        .await?
        .map(Json)
        .ok_or(AppError::InternalServerError)
}

// POST /api/logout
// Só termina a sessão de quem faz o pedido
pub async fn handle_logout(session: Session) -> AppResult<StatusCode> {
    auth_service::logout(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/me
pub async fn current_session(Extension(sessao): Extension<Sessao>) -> Json<Sessao> {
    Json(sessao)
}
