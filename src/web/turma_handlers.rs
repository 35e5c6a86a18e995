// src/web/turma_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{turma::Turma, vendedor::Vendedor},
    services::{turma_service, vendedor_service},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::Serialize;

/// Linha da página inicial: a turma e quantos participantes tem.
#[derive(Debug, Serialize)]
pub struct TurmaResumo {
    #[serde(flatten)]
    pub turma: Turma,
    pub participantes: usize,
}

#[derive(Debug, Serialize)]
pub struct TurmaDetalhe {
    pub turma: Turma,
    pub vendedores: Vec<Vendedor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseResposta {
    pub analise: String,
    pub gerado_em: String,
}

async fn load_turma(state: &AppState, turma_id: &str) -> AppResult<Turma> {
    turma_service::find_turma_by_id(state.store(), turma_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("turma '{}'", turma_id)))
}

// GET /api/turmas
pub async fn list_turmas(State(state): State<AppState>) -> AppResult<Json<Vec<TurmaResumo>>> {
    let turmas = turma_service::find_all_turmas(state.store()).await?;
    let counts = turma_service::count_participants(state.store()).await?;

    let resumo = turmas
        .into_iter()
        .map(|turma| {
            let participantes = counts.get(&turma.id).copied().unwrap_or(0);
            TurmaResumo {
                turma,
                participantes,
            }
        })
        .collect();
    Ok(Json(resumo))
}

// POST /api/turmas/nova: só gera o esqueleto, nada é gravado
pub async fn new_turma() -> Json<Turma> {
    Json(Turma::nova())
}

// GET /api/turmas/{id}
pub async fn show_turma(
    State(state): State<AppState>,
    Path(turma_id): Path<String>,
) -> AppResult<Json<TurmaDetalhe>> {
    let turma = load_turma(&state, &turma_id).await?;
    let vendedores = vendedor_service::find_all_vendedores(state.store(), Some(turma_id.as_str())).await?;
    Ok(Json(TurmaDetalhe { turma, vendedores }))
}

// PUT /api/turmas/{id}
pub async fn save_turma(
    State(state): State<AppState>,
    Path(turma_id): Path<String>,
    Json(mut turma): Json<Turma>,
) -> AppResult<Json<Turma>> {
    // O id da rota manda
    turma.id = turma_id;
    if !turma.tem_datas() {
        tracing::warn!("Turma '{}' sem datas, gravação recusada.", turma.id);
        return Err(AppError::Validation("Preencha as datas.".to_string()));
    }

    let turma = turma.com_nome_padrao();
    turma_service::save_turma(state.store(), turma.clone()).await?;
    Ok(Json(turma))
}

// DELETE /api/turmas/{id}
pub async fn delete_turma(
    State(state): State<AppState>,
    Path(turma_id): Path<String>,
) -> AppResult<StatusCode> {
    turma_service::delete_turma(state.store(), &turma_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/turmas/{id}/analise
pub async fn analyze_turma(
    State(state): State<AppState>,
    Path(turma_id): Path<String>,
) -> AppResult<Json<AnaliseResposta>> {
    let turma = load_turma(&state, &turma_id).await?;
    let vendedores = vendedor_service::find_all_vendedores(state.store(), Some(turma_id.as_str())).await?;

    tracing::info!("🤖 Pedindo análise da turma '{}' ({} participantes).", turma.id, vendedores.len());
    let analise = state.analista.analisar(&turma, &vendedores).await;

    Ok(Json(AnaliseResposta {
        analise,
        gerado_em: Local::now().to_rfc3339(),
    }))
}
