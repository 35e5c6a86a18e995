// src/models/vendedor.rs
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeMap};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Mapa aberto de checklist: chave de coluna -> marcado. Chave ausente = `false`.
pub type Flags = BTreeMap<String, bool>;

/// Participante de uma turma. Também serve de contacto de liderança quando o
/// `cargo` é de supervisor/coordenador/gerente.
///
/// Supervisor, coordenador e gerente são nomes em texto livre, não ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vendedor {
    pub id: String,
    pub turma_id: String,
    /// Nome do colaborador.
    pub nome: String,
    pub matricula: String,
    pub usuario: String,
    pub id_claro: String,
    pub regional: String,
    /// MDU, SDU, PME, VAREJO ou outro valor livre.
    pub canal: String,
    pub cidade: String,
    pub uf: String,
    pub supervisor: String,
    pub coordenador: String,
    pub gerente: String,
    pub telefone: String,
    pub email: String,
    pub dn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acessos: Option<Flags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apresentacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fotos: Option<Flags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presenca: Option<Flags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prova: Option<String>,
}

/// Canal atribuído a um registo novo criado sem canal.
pub const CANAL_PADRAO: &str = "VAREJO";

/// Rótulo mostrado quando o `turmaId` não corresponde a nenhuma turma.
pub const TURMA_REMOVIDA: &str = "Turma Removida";

/// Linha do diretório de lideranças: o participante mais o rótulo da turma.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContatoLideranca {
    #[serde(flatten)]
    pub vendedor: Vendedor,
    pub turma_nome: String,
    pub whatsapp: Option<String>,
}

/// Os três grupos de checklist de um participante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrupoFlags {
    Acessos,
    Fotos,
    Presenca,
}

pub const COLUNAS_ACESSOS: &[(&str, &str)] = &[
    ("rede", "REDE"),
    ("idm", "IDM"),
    ("reset", "RESET"),
    ("duo_claro", "DUO CLARO"),
    ("oma", "OMA"),
    ("authenticator", "AUTHENTICATOR"),
    ("email", "E-MAIL"),
    ("autentica", "AUTENTICA"),
    ("conexao_simplificada", "CONEXÃO SIMPLIFICADA"),
    ("bcc_one", "BCC ONE"),
    ("solar", "SOLAR"),
    ("rvi", "RVI"),
    ("vpn", "VPN"),
    ("duo_bcc", "DUO BCC"),
    ("orhganiza", "ORHGANIZA"),
];

pub const COLUNAS_FOTOS: &[(&str, &str)] = &[("lado_a_lado", "Lado a lado"), ("entrega", "Entrega")];

pub const COLUNAS_PRESENCA: &[(&str, &str)] = &[
    ("dia_01", "Dia 01"),
    ("dia_02", "Dia 02"),
    ("dia_03", "Dia 03"),
    ("dia_04", "Dia 04"),
    ("dia_05", "Dia 05"),
    ("dia_06", "Dia 06"),
    ("dia_07", "Dia 07"),
];

impl GrupoFlags {
    /// Colunas conhecidas (chave, rótulo). O mapa continua aberto a outras chaves.
    pub fn colunas(self) -> &'static [(&'static str, &'static str)] {
        match self {
            GrupoFlags::Acessos => COLUNAS_ACESSOS,
            GrupoFlags::Fotos => COLUNAS_FOTOS,
            GrupoFlags::Presenca => COLUNAS_PRESENCA,
        }
    }
}

/// Cargos de liderança usados no diretório e nos selects do formulário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lideranca {
    Supervisor,
    Coordenador,
    Gerente,
}

impl Lideranca {
    fn termo(self) -> &'static str {
        match self {
            Lideranca::Supervisor => "supervisor",
            Lideranca::Coordenador => "coordenador",
            Lideranca::Gerente => "gerente",
        }
    }

    /// "Supervisor(a)", "supervisora regional" etc. contam como supervisor.
    pub fn corresponde(self, cargo: Option<&str>) -> bool {
        cargo.is_some_and(|c| c.to_lowercase().contains(self.termo()))
    }
}

impl Vendedor {
    fn grupo(&self, grupo: GrupoFlags) -> Option<&Flags> {
        match grupo {
            GrupoFlags::Acessos => self.acessos.as_ref(),
            GrupoFlags::Fotos => self.fotos.as_ref(),
            GrupoFlags::Presenca => self.presenca.as_ref(),
        }
    }

    fn grupo_mut(&mut self, grupo: GrupoFlags) -> &mut Flags {
        let slot = match grupo {
            GrupoFlags::Acessos => &mut self.acessos,
            GrupoFlags::Fotos => &mut self.fotos,
            GrupoFlags::Presenca => &mut self.presenca,
        };
        slot.get_or_insert_with(Flags::new)
    }

    /// Valor de uma flag; mapa ou chave ausente = `false`.
    pub fn flag(&self, grupo: GrupoFlags, chave: &str) -> bool {
        self.grupo(grupo)
            .and_then(|flags| flags.get(chave).copied())
            .unwrap_or(false)
    }

    /// Inverte a flag e devolve o novo valor.
    pub fn alternar_flag(&mut self, grupo: GrupoFlags, chave: &str) -> bool {
        let novo = !self.flag(grupo, chave);
        self.grupo_mut(grupo).insert(chave.to_string(), novo);
        novo
    }
}

/// Nota da prova: só dígitos, no máximo 3. Vazio é aceite (limpa a nota).
pub fn nota_valida(valor: &str) -> bool {
    valor.len() <= 3 && valor.chars().all(|c| c.is_ascii_digit())
}

// Letras sem decomposição canónica que o NFD não separa do acento
fn letra_base(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'đ' => "d",
        'Đ' => "D",
        'ł' => "l",
        'Ł' => "L",
        'þ' => "th",
        'Þ' => "TH",
        _ => return None,
    })
}

// Nível primário: sem acentos nem maiúsculas
fn chave_primaria(nome: &str) -> String {
    let mut chave = String::with_capacity(nome.len());
    for c in nome.nfd().filter(|c| !is_combining_mark(*c)) {
        match letra_base(c) {
            Some(base) => chave.push_str(base),
            None => chave.push(c),
        }
    }
    chave.to_lowercase()
}

/// Ordem alfabética "à moda do locale": primeiro ignora acentos e maiúsculas,
/// depois desempata pelos acentos e por fim põe minúsculas antes de
/// maiúsculas ("ana" < "Ana").
pub fn comparar_nomes(a: &str, b: &str) -> Ordering {
    chave_primaria(a)
        .cmp(&chave_primaria(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Igualdade de nomes sem diferenciar maiúsculas (junção por nome livre).
pub fn mesmo_nome(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Link de WhatsApp (Brasil, +55) a partir de um telefone em texto livre.
pub fn link_whatsapp(telefone: &str) -> Option<String> {
    let digitos: String = telefone.chars().filter(char::is_ascii_digit).collect();
    if digitos.is_empty() {
        None
    } else {
        Some(format!("https://wa.me/55{}", digitos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flags_read_as_false_and_toggle_inverts() {
        let mut v = Vendedor::default();
        assert!(!v.flag(GrupoFlags::Acessos, "vpn"));

        assert!(v.alternar_flag(GrupoFlags::Acessos, "vpn"));
        assert!(v.flag(GrupoFlags::Acessos, "vpn"));
        assert!(!v.alternar_flag(GrupoFlags::Acessos, "vpn"));
        assert!(!v.flag(GrupoFlags::Acessos, "vpn"));

        // Os outros grupos não são tocados
        assert!(v.fotos.is_none());
        assert!(v.presenca.is_none());
    }

    #[test]
    fn keys_outside_known_columns_are_accepted() {
        let mut v = Vendedor::default();
        v.alternar_flag(GrupoFlags::Presenca, "coluna_extra");
        assert!(v.flag(GrupoFlags::Presenca, "coluna_extra"));
        assert!(!GrupoFlags::Presenca
            .colunas()
            .iter()
            .any(|(chave, _)| *chave == "coluna_extra"));
        assert_eq!(GrupoFlags::Acessos.colunas().len(), 15);
    }

    #[test]
    fn score_validation() {
        for ok in ["7", "42", "007", ""] {
            assert!(nota_valida(ok), "{ok:?} devia ser aceite");
        }
        for bad in ["12a", "1234", "ab", "-1", "1 2", "١٢"] {
            assert!(!nota_valida(bad), "{bad:?} devia ser rejeitada");
        }
    }

    #[test]
    fn name_ordering_ignores_accents_and_case_first() {
        let mut nomes = vec!["carlos", "Ana Souza", "Álvaro", "Bruno", "Ana souza"];
        nomes.sort_by(|a, b| comparar_nomes(a, b));
        assert_eq!(nomes, vec!["Álvaro", "Ana souza", "Ana Souza", "Bruno", "carlos"]);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_ties() {
        let mut nomes = vec!["Ana", "ana"];
        nomes.sort_by(|a, b| comparar_nomes(a, b));
        assert_eq!(nomes, vec!["ana", "Ana"]);

        // Sem acento antes de com acento, antes de olhar para maiúsculas
        let mut nomes = vec!["Élio", "elio"];
        nomes.sort_by(|a, b| comparar_nomes(a, b));
        assert_eq!(nomes, vec!["elio", "Élio"]);
    }

    #[test]
    fn accents_beyond_portuguese_fold_to_base_letter() {
        assert_eq!(comparar_nomes("Ýves", "Yves"), Ordering::Greater);
        assert_eq!(comparar_nomes("Ýves", "Yvette"), Ordering::Less);
        assert_eq!(comparar_nomes("Čeněk", "Ceci"), Ordering::Greater);
        assert_eq!(comparar_nomes("Čeněk", "Cida"), Ordering::Less);
        assert_eq!(comparar_nomes("Søren", "Sophia"), Ordering::Greater);
        assert_eq!(comparar_nomes("Søren", "Susana"), Ordering::Less);
        assert_eq!(comparar_nomes("Strauß", "Strauss"), Ordering::Greater);
        assert_eq!(comparar_nomes("Strauß", "Strausz"), Ordering::Less);
    }

    #[test]
    fn leadership_role_matching() {
        assert!(Lideranca::Supervisor.corresponde(Some("Supervisor(a)")));
        assert!(Lideranca::Coordenador.corresponde(Some("COORDENADOR(A)")));
        assert!(!Lideranca::Gerente.corresponde(Some("Consultor")));
        assert!(!Lideranca::Gerente.corresponde(None));
    }

    #[test]
    fn whatsapp_link_keeps_digits_only() {
        assert_eq!(
            link_whatsapp("(11) 99999-9999").as_deref(),
            Some("https://wa.me/5511999999999")
        );
        assert_eq!(link_whatsapp(""), None);
        assert_eq!(link_whatsapp("sem número"), None);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let v: Vendedor = serde_json::from_str(r#"{"id":"9","turmaId":"1","nome":"Zé"}"#).unwrap();
        assert_eq!(v.turma_id, "1");
        assert_eq!(v.matricula, "");
        assert!(v.cargo.is_none());

        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("acessos").is_none());
        assert_eq!(json["idClaro"], "");
    }
}
