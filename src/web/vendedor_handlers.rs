// src/web/vendedor_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        gerar_id,
        vendedor::{GrupoFlags, Vendedor, CANAL_PADRAO},
    },
    services::vendedor_service,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    turma_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApresentacaoForm {
    texto: String,
}

#[derive(Debug, Deserialize)]
pub struct ProvaForm {
    nota: String,
}

#[derive(Debug, Serialize)]
pub struct Coluna {
    chave: &'static str,
    rotulo: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ColunasFlags {
    acessos: Vec<Coluna>,
    fotos: Vec<Coluna>,
    presenca: Vec<Coluna>,
}

fn not_found(vendedor_id: &str) -> AppError {
    AppError::NotFound(format!("participante '{}'", vendedor_id))
}

// GET /api/vendedores?turma_id=...
pub async fn list_vendedores(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Vendedor>>> {
    let turma_id = params.turma_id.as_deref().filter(|id| !id.is_empty());
    let vendedores = vendedor_service::find_all_vendedores(state.store(), turma_id).await?;
    Ok(Json(vendedores))
}

// GET /api/vendedores/{id}
pub async fn show_vendedor(
    State(state): State<AppState>,
    Path(vendedor_id): Path<String>,
) -> AppResult<Json<Vendedor>> {
    vendedor_service::find_vendedor_by_id(state.store(), &vendedor_id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&vendedor_id))
}

// POST /api/vendedores (cria ou atualiza; id vazio = novo, canal vazio = VAREJO)
pub async fn save_vendedor(
    State(state): State<AppState>,
    Json(mut vendedor): Json<Vendedor>,
) -> AppResult<Json<Vendedor>> {
    if vendedor.nome.trim().is_empty() {
        return Err(AppError::Validation("Preencha o nome.".to_string()));
    }
    if vendedor.id.is_empty() {
        vendedor.id = gerar_id();
        if vendedor.canal.trim().is_empty() {
            vendedor.canal = CANAL_PADRAO.to_string();
        }
        tracing::info!("Novo participante '{}' na turma '{}'.", vendedor.id, vendedor.turma_id);
    }
    vendedor_service::save_vendedor(state.store(), vendedor.clone()).await?;
    Ok(Json(vendedor))
}

// DELETE /api/vendedores/{id}
pub async fn delete_vendedor(
    State(state): State<AppState>,
    Path(vendedor_id): Path<String>,
) -> AppResult<StatusCode> {
    vendedor_service::delete_vendedor(state.store(), &vendedor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/vendedores/{id}/flags/{grupo}/{chave}
pub async fn toggle_flag(
    State(state): State<AppState>,
    Path((vendedor_id, grupo, chave)): Path<(String, GrupoFlags, String)>,
) -> AppResult<Json<Vendedor>> {
    vendedor_service::toggle_flag(state.store(), &vendedor_id, grupo, &chave)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&vendedor_id))
}

// PUT /api/vendedores/{id}/apresentacao
pub async fn save_apresentacao(
    State(state): State<AppState>,
    Path(vendedor_id): Path<String>,
    Json(form): Json<ApresentacaoForm>,
) -> AppResult<Json<Vendedor>> {
    vendedor_service::save_apresentacao(state.store(), &vendedor_id, form.texto)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&vendedor_id))
}

// PUT /api/vendedores/{id}/prova
// Nota inválida não dá erro: a resposta traz o registo sem alteração
pub async fn record_prova(
    State(state): State<AppState>,
    Path(vendedor_id): Path<String>,
    Json(form): Json<ProvaForm>,
) -> AppResult<Json<Vendedor>> {
    vendedor_service::record_prova(state.store(), &vendedor_id, &form.nota)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&vendedor_id))
}

// GET /api/colunas
pub async fn list_colunas() -> Json<ColunasFlags> {
    let colunas = |grupo: GrupoFlags| -> Vec<Coluna> {
        grupo
            .colunas()
            .iter()
            .map(|&(chave, rotulo)| Coluna { chave, rotulo })
            .collect()
    };
    Json(ColunasFlags {
        acessos: colunas(GrupoFlags::Acessos),
        fotos: colunas(GrupoFlags::Fotos),
        presenca: colunas(GrupoFlags::Presenca),
    })
}
