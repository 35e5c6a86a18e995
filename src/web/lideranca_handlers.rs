// src/web/lideranca_handlers.rs
use crate::{
    error::AppResult,
    models::vendedor::{link_whatsapp, ContatoLideranca, Lideranca, Vendedor},
    services::vendedor_service,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct BuscaParams {
    busca: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelefoneParams {
    nome: String,
}

#[derive(Debug, Serialize)]
pub struct TelefoneResposta {
    telefone: Option<String>,
    whatsapp: Option<String>,
}

// GET /api/lideranca?busca=...
pub async fn list_contatos(
    State(state): State<AppState>,
    Query(params): Query<BuscaParams>,
) -> AppResult<Json<Vec<ContatoLideranca>>> {
    let contatos =
        vendedor_service::leadership_directory(state.store(), params.busca.as_deref()).await?;
    Ok(Json(contatos))
}

// GET /api/lideranca/cargos/{cargo}
pub async fn list_por_cargo(
    State(state): State<AppState>,
    Path(cargo): Path<Lideranca>,
) -> AppResult<Json<Vec<Vendedor>>> {
    let lideres = vendedor_service::leaders_by_role(state.store(), cargo).await?;
    Ok(Json(lideres))
}

// GET /api/lideranca/telefone?nome=...
// Nome desconhecido não é erro: telefone e link vêm a null
pub async fn supervisor_phone(
    State(state): State<AppState>,
    Query(params): Query<TelefoneParams>,
) -> AppResult<Json<TelefoneResposta>> {
    let telefone = vendedor_service::supervisor_phone(state.store(), &params.nome).await?;
    let whatsapp = telefone.as_deref().and_then(link_whatsapp);
    Ok(Json(TelefoneResposta { telefone, whatsapp }))
}
