// src/services/auth_service.rs
//! Sessão e autenticação. Cada cliente tem a sua `Session` (cookie); o
//! utilizador autenticado fica lá guardado sem a senha, e a presença desse
//! registo é o único sinal de "autenticado".

use crate::{
    error::AppResult,
    models::usuario::Sessao,
    services::user_service,
    storage::KvStore,
};
use tower_sessions::Session;

/// Chave do registo da sessão dentro da `Session` do cliente.
pub const SESSAO_KEY: &str = "app_session_v1";

/// Compara e-mail e senha exatamente (diferencia maiúsculas). Em caso de
/// sucesso grava a sessão; em caso de falha a sessão existente fica intacta.
pub async fn login(
    store: &dyn KvStore,
    session: &Session,
    email: &str,
    senha: &str,
) -> AppResult<bool> {
    let users = user_service::find_all_users(store).await?;
    let Some(user) = users
        .iter()
        .find(|u| u.email == email && u.senha.as_deref() == Some(senha))
    else {
        tracing::warn!("Login falhou para: {}", email);
        return Ok(false);
    };

    // Novo id de sessão a cada login
    session.cycle_id().await?;
    session.insert(SESSAO_KEY, Sessao::from(user)).await?;
    tracing::info!("✅ Login bem-sucedido para: {}", user.email);
    Ok(true)
}

/// Termina apenas a sessão deste cliente.
pub async fn logout(session: &Session) -> AppResult<()> {
    if let Some(sessao) = current_user(session).await? {
        tracing::info!("🚪 Sessão terminada para: {}", sessao.email);
    }
    session.flush().await?;
    Ok(())
}

/// Só verifica se o registo existe; não revalida o utilizador.
pub async fn is_authenticated(session: &Session) -> AppResult<bool> {
    Ok(session.get_value(SESSAO_KEY).await?.is_some())
}

/// Registo ilegível conta como ausente.
pub async fn current_user(session: &Session) -> AppResult<Option<Sessao>> {
    match session.get::<Sessao>(SESSAO_KEY).await {
        Ok(sessao) => Ok(sessao),
        Err(tower_sessions::session::Error::SerdeJson(e)) => {
            tracing::warn!("Sessão gravada ilegível: {}", e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::usuario::Usuario,
        services::user_service::{ADMIN_PADRAO_EMAIL, ADMIN_PADRAO_SENHA},
        storage::MemoryStore,
    };
    use std::sync::Arc;
    use testresult::TestResult;

    fn nova_sessao(sessoes: &Arc<tower_sessions::MemoryStore>) -> Session {
        Session::new(None, sessoes.clone(), None)
    }

    #[tokio::test]
    async fn login_lifecycle() -> TestResult {
        let store = MemoryStore::default();
        let session = nova_sessao(&Arc::default());

        assert!(!login(&store, &session, "ninguem@x.com", "errada").await?);
        assert!(!is_authenticated(&session).await?);

        assert!(login(&store, &session, ADMIN_PADRAO_EMAIL, ADMIN_PADRAO_SENHA).await?);
        assert!(is_authenticated(&session).await?);

        let raw = session.get_value(SESSAO_KEY).await?.ok_or("sessão em falta")?;
        assert!(raw.get("senha").is_none());
        assert_eq!(raw["email"], ADMIN_PADRAO_EMAIL);

        logout(&session).await?;
        assert!(!is_authenticated(&session).await?);
        assert!(current_user(&session).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn failed_login_keeps_existing_session() -> TestResult {
        let store = MemoryStore::default();
        let session = nova_sessao(&Arc::default());
        assert!(login(&store, &session, ADMIN_PADRAO_EMAIL, ADMIN_PADRAO_SENHA).await?);

        // Senha certa mas e-mail com maiúsculas: não corresponde
        let email = ADMIN_PADRAO_EMAIL.to_uppercase();
        assert!(!login(&store, &session, &email, ADMIN_PADRAO_SENHA).await?);

        let sessao = current_user(&session).await?.ok_or("sessão em falta")?;
        assert_eq!(sessao.email, ADMIN_PADRAO_EMAIL);
        Ok(())
    }

    #[tokio::test]
    async fn sessions_are_per_client() -> TestResult {
        let store = MemoryStore::default();
        let sessoes = Arc::default();
        let operador = nova_sessao(&sessoes);
        let outro = nova_sessao(&sessoes);

        assert!(login(&store, &operador, ADMIN_PADRAO_EMAIL, ADMIN_PADRAO_SENHA).await?);
        assert!(!is_authenticated(&outro).await?);

        // Logout de outro cliente não toca na sessão do operador
        logout(&outro).await?;
        assert!(is_authenticated(&operador).await?);
        Ok(())
    }

    #[tokio::test]
    async fn session_survives_user_deletion() -> TestResult {
        let store = MemoryStore::default();
        let session = nova_sessao(&Arc::default());
        user_service::save_user(
            &store,
            Usuario {
                id: "u2".into(),
                nome: "Maria".into(),
                email: "maria@x.com".into(),
                senha: Some("123".into()),
            },
        )
        .await?;
        assert!(login(&store, &session, "maria@x.com", "123").await?);

        user_service::delete_user(&store, "u2").await?;
        assert!(is_authenticated(&session).await?);
        assert_eq!(current_user(&session).await?.map(|s| s.id).as_deref(), Some("u2"));
        Ok(())
    }
}
