// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Configuração inválida: {0}")]
    Config(String),

    // Só acontece ao serializar; leituras corrompidas viram coleção vazia
    #[error("Erro ao serializar dados: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Erro de sessão: {0}")]
    SessionError(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Não autorizado")]
    Unauthorized,

    #[error("Não encontrado: {0}")]
    NotFound(String),

    // Mensagem já pronta para o utilizador (ex: "Preencha as datas.")
    #[error("{0}")]
    Validation(String),

    #[error("Você não pode excluir seu próprio usuário.")]
    SelfDeletion,

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Como converter AppError numa resposta HTTP (JSON)
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match &self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) | AppError::JsonError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.".to_string())
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar a sessão.".to_string())
            }
            AppError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.".to_string())
            }
            // Mensagem genérica, não revela qual dos campos falhou
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Não autorizado.".to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::SelfDeletion => (StatusCode::CONFLICT, self.to_string()),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ocorreu um erro inesperado.".to_string(),
            ),
        };

        (status, Json(json!({ "erro": user_message }))).into_response()
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(e: tower_sessions::session::Error) -> Self {
        AppError::SessionError(e.to_string())
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
