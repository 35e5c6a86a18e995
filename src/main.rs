// src/main.rs

// --- Declaração dos Módulos ---
mod config;
mod db;
mod error;
mod models;
mod services;
mod state;
mod storage;
mod web;

// --- Imports ---
use crate::{
    config::Config,
    services::{analysis_service, turma_service, user_service},
    state::AppState,
    storage::{KvStore, MemoryStore, SqliteKvStore},
    web::routes::session_layer,
};
use axum::serve;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const MEMORY_DATABASE_URL: &str = "memory";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "gestao_turmas=debug,tower_http=info,sqlx=warn,tower_sessions=info".into()
        }))
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando Gestão de Turmas...");

    let config = Config::from_env()?;

    // --- Configuração da Base de Dados e das Sessões ---
    // DATABASE_URL=memory: dados e sessões só em memória, perdidos ao parar
    let (store, session_store): (Arc<dyn KvStore>, Option<SqliteStore>) =
        if config.database_url == MEMORY_DATABASE_URL {
            tracing::warn!("⚠️ A usar armazenamento em memória; nada será persistido.");
            (Arc::new(MemoryStore::default()), None)
        } else {
            let db_pool = match db::create_db_pool(&config.database_url).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
                    return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
                }
            };
            let session_store = SqliteStore::new(db_pool.clone())
                .with_table_name("sessions")
                .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
            session_store.migrate().await?;
            (Arc::new(SqliteKvStore::new(db_pool)), Some(session_store))
        };

    // --- Dados iniciais ---
    user_service::seed_users(store.as_ref()).await?;
    if config.seed_demo {
        turma_service::seed_demo_data(store.as_ref()).await?;
    }

    // --- Criação do Estado da Aplicação ---
    let analista = Arc::from(analysis_service::from_config(&config));
    let app_state = AppState::new(store, analista);

    // --- Configuração do Endereço e Listener ---
    tracing::info!("📡 Servidor escutando em http://{}", config.bind_addr);
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };

    let app = web::routes::create_router(app_state);
    let app = match session_store {
        Some(session_store) => {
            let limpeza = session_store.clone();
            tokio::spawn(async move {
                if let Err(e) = limpeza
                    .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
                    .await
                {
                    tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
                }
            });
            tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");
            app.layer(session_layer(session_store))
        }
        None => app.layer(session_layer(tower_sessions::MemoryStore::default())),
    };
    let app = app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));
    tracing::info!("✅ Router e middlewares configurados.");

    // --- Início do Servidor ---
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
