// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, lideranca_handlers, mw_auth, turma_handlers, usuario_handlers,
        vendedor_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

/// Camada de sessão por cliente (cookie `id`), expira após um dia sem uso.
pub fn session_layer<S: SessionStore + Clone>(session_store: S) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
}

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", post(auth_handlers::handle_login))
        .route("/logout", post(auth_handlers::handle_logout));

    let turma_routes = Router::new()
        .route("/", get(turma_handlers::list_turmas))
        .route("/nova", post(turma_handlers::new_turma))
        .route(
            "/{id}",
            get(turma_handlers::show_turma)
                .put(turma_handlers::save_turma)
                .delete(turma_handlers::delete_turma),
        )
        .route("/{id}/analise", post(turma_handlers::analyze_turma));

    let vendedor_routes = Router::new()
        .route(
            "/",
            get(vendedor_handlers::list_vendedores).post(vendedor_handlers::save_vendedor),
        )
        .route(
            "/{id}",
            get(vendedor_handlers::show_vendedor).delete(vendedor_handlers::delete_vendedor),
        )
        .route("/{id}/flags/{grupo}/{chave}", post(vendedor_handlers::toggle_flag))
        .route("/{id}/apresentacao", put(vendedor_handlers::save_apresentacao))
        .route("/{id}/prova", put(vendedor_handlers::record_prova));

    let lideranca_routes = Router::new()
        .route("/", get(lideranca_handlers::list_contatos))
        .route("/telefone", get(lideranca_handlers::supervisor_phone))
        .route("/cargos/{cargo}", get(lideranca_handlers::list_por_cargo));

    let usuario_routes = Router::new()
        .route(
            "/",
            get(usuario_handlers::list_usuarios).post(usuario_handlers::save_usuario),
        )
        .route(
            "/{id}",
            get(usuario_handlers::show_usuario).delete(usuario_handlers::delete_usuario),
        );

    // --- Rotas Autenticadas ---
    let authenticated_routes = Router::new()
        .route("/me", get(auth_handlers::current_session))
        .route("/colunas", get(vendedor_handlers::list_colunas))
        .nest("/turmas", turma_routes)
        .nest("/vendedores", vendedor_routes)
        .nest("/lideranca", lideranca_routes)
        .nest("/usuarios", usuario_routes)
        .route_layer(middleware::from_fn(mw_auth::require_auth));

    // --- Router Final ---
    Router::new()
        .nest("/api", public_routes.merge(authenticated_routes))
        .with_state(app_state)
}
