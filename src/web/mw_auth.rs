// src/web/mw_auth.rs
use crate::{error::AppError, services::auth_service};
use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

/// Middleware que exige uma sessão ativa neste cliente. Coloca a `Sessao` nas
/// extensões da requisição para os handlers protegidos.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !auth_service::is_authenticated(&session).await? {
        tracing::debug!("Autenticação MW: sem sessão ativa.");
        return Err(AppError::Unauthorized);
    }

    // Registo presente mas ilegível também não passa
    let Some(sessao) = auth_service::current_user(&session).await? else {
        tracing::warn!("Autenticação MW: sessão gravada ilegível.");
        return Err(AppError::Unauthorized);
    };

    tracing::debug!("Autenticação MW: '{}' autenticado.", sessao.email);
    request.extensions_mut().insert(sessao);
    Ok(next.run(request).await)
}
