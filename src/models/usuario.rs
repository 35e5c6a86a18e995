// src/models/usuario.rs
use serde::{Deserialize, Serialize};

// Representa um utilizador guardado na coleção de usuários
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: String,
    pub nome: String,
    /// Usado como login.
    pub email: String,
    // Em texto simples; opcional porque as listagens da API não a devolvem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
}

/// Registo da sessão ativa: o utilizador sem a senha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sessao {
    pub id: String,
    pub nome: String,
    pub email: String,
}

impl From<&Usuario> for Sessao {
    fn from(usuario: &Usuario) -> Self {
        Self {
            id: usuario.id.clone(),
            nome: usuario.nome.clone(),
            email: usuario.email.clone(),
        }
    }
}

impl Usuario {
    /// Cópia sem a senha, para respostas da API.
    pub fn sem_senha(&self) -> Self {
        Self {
            senha: None,
            ..self.clone()
        }
    }
}

// Dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub senha: String,
}
