// src/models/turma.rs
use serde::{Deserialize, Serialize};

/// Uma turma (coorte de formação). Campos em camelCase como no documento gravado.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Turma {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    pub data_inicial: String,
    /// Data de entrega (usada como data final).
    pub data_entrega: String,
    pub sin: String,
    pub jump: String,
}

impl Turma {
    /// Esqueleto para "nova turma", já com id gerado.
    pub fn nova() -> Self {
        Self {
            id: super::gerar_id(),
            ..Self::default()
        }
    }

    /// Nome por omissão quando a turma não tem nome: "Turma " + 4 primeiros
    /// caracteres do id em maiúsculas.
    pub fn nome_padrao(&self) -> String {
        let prefixo: String = self.id.chars().take(4).collect();
        format!("Turma {}", prefixo.to_uppercase())
    }

    /// Rótulo usado nas junções (diretório de lideranças).
    pub fn rotulo(&self) -> String {
        match self.nome.as_deref() {
            Some(nome) if !nome.is_empty() => nome.to_string(),
            _ => format!("Turma {}", self.id),
        }
    }

    /// Ambas as datas são obrigatórias antes de gravar. A ordem entre elas não é validada.
    pub fn tem_datas(&self) -> bool {
        !self.data_inicial.trim().is_empty() && !self.data_entrega.trim().is_empty()
    }

    /// Preenche o nome por omissão se estiver vazio.
    pub fn com_nome_padrao(mut self) -> Self {
        if self.nome.as_deref().map_or(true, str::is_empty) {
            self.nome = Some(self.nome_padrao());
        }
        self
    }
}
