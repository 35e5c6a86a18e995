// src/services/analysis_service.rs
//! Análise de turma por IA (serviço externo). Qualquer falha vira uma
//! mensagem legível; nunca um erro para quem chama.

use crate::{
    config::Config,
    models::{turma::Turma, vendedor::Vendedor},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

pub const MSG_SEM_CHAVE: &str = "Erro: Chave de API não configurada.";
pub const MSG_SEM_TEXTO: &str = "Não foi possível gerar a análise.";
pub const MSG_FALHA: &str = "Ocorreu um erro ao tentar analisar os dados com a IA.";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Quem gera o texto de análise de uma turma.
#[async_trait]
pub trait AnaliseTurma: Send + Sync {
    async fn analisar(&self, turma: &Turma, vendedores: &[Vendedor]) -> String;
}

/// Monta o prompt enviado ao modelo.
pub fn montar_prompt(turma: &Turma, vendedores: &[Vendedor]) -> String {
    let lista = vendedores
        .iter()
        .map(|v| format!("{} ({})", v.nome, v.cargo.as_deref().unwrap_or("sem cargo")))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Atue como um analista de dados e gerente de vendas sênior. Analise os seguintes dados de uma turma de vendas:\n\
         \n\
         Nome da Turma: {nome}\n\
         Data Inicial: {inicio}\n\
         Data de Entrega: {entrega}\n\
         Indicador SIN: {sin}\n\
         Indicador JUMP: {jump}\n\
         Quantidade de Vendedores: {qtd}\n\
         Lista de Vendedores: {lista}\n\
         \n\
         Por favor, forneça:\n\
         1. Uma breve análise sobre a relação entre os indicadores SIN e JUMP.\n\
         2. Uma sugestão estratégica para melhorar a performance desta equipe antes da data de entrega.\n\
         3. Identifique se a proporção de líderes/consultores parece adequada (baseado nos cargos).\n\
         \n\
         Responda em formato Markdown, de forma concisa e profissional, em Português.",
        nome = turma.rotulo(),
        inicio = turma.data_inicial,
        entrega = turma.data_entrega,
        sin = turma.sin,
        jump = turma.jump,
        qtd = vendedores.len(),
        lista = lista,
    )
}

/// Sem chave configurada: responde sempre com a mensagem fixa.
#[derive(Debug, Clone, Default)]
pub struct SemChave;

#[async_trait]
impl AnaliseTurma for SemChave {
    async fn analisar(&self, _turma: &Turma, _vendedores: &[Vendedor]) -> String {
        tracing::error!("Chave de API não encontrada nas variáveis de ambiente.");
        MSG_SEM_CHAVE.to_string()
    }
}

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("resposta inesperada do Gemini: {0}")]
    UnexpectedResponse(String),
}

/// Cliente HTTP para a API `generateContent` do Gemini.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Devolve o texto gerado, ou `None` se a resposta não trouxer texto.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GeminiError::UnexpectedResponse(format!(
                "generateContent falhou com status {status}: {text}"
            )));
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.texto())
    }
}

#[async_trait]
impl AnaliseTurma for GeminiClient {
    async fn analisar(&self, turma: &Turma, vendedores: &[Vendedor]) -> String {
        let prompt = montar_prompt(turma, vendedores);
        match self.generate(&prompt).await {
            Ok(Some(texto)) => texto,
            Ok(None) => MSG_SEM_TEXTO.to_string(),
            Err(e) => {
                tracing::error!("Erro ao chamar Gemini: {}", e);
                MSG_FALHA.to_string()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    // Junta as partes de texto do primeiro candidato
    fn texto(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texto: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!texto.trim().is_empty()).then_some(texto)
    }
}

/// Escolhe o colaborador conforme a configuração.
pub fn from_config(config: &Config) -> Box<dyn AnaliseTurma> {
    match &config.gemini_api_key {
        Some(key) => {
            tracing::info!("🤖 Análise por IA ativa (modelo {}).", config.gemini_model);
            Box::new(GeminiClient::new(key.clone(), config.gemini_model.clone()))
        }
        None => {
            tracing::warn!("⚠️ GEMINI_API_KEY não definida, análise por IA desativada.");
            Box::new(SemChave)
        }
    }
}
