// src/services/vendedor_service.rs
use crate::{
    error::AppResult,
    models::{
        turma::Turma,
        vendedor::{
            comparar_nomes, link_whatsapp, mesmo_nome, nota_valida, ContatoLideranca, GrupoFlags,
            Lideranca, Vendedor, TURMA_REMOVIDA,
        },
    },
    services::{turma_service, upsert_by_id},
    storage::{self, Colecao, KvStore},
};

/// Lista participantes por ordem alfabética de nome.
///
/// A ordenação é sempre feita sobre o conjunto completo; o filtro por turma é
/// aplicado depois e preserva a ordem relativa.
pub async fn find_all_vendedores(
    store: &dyn KvStore,
    turma_id: Option<&str>,
) -> AppResult<Vec<Vendedor>> {
    let mut todos: Vec<Vendedor> = storage::read_collection(store, Colecao::Vendedores).await?;
    // sort_by é estável: nomes iguais mantêm a ordem gravada
    todos.sort_by(|a, b| comparar_nomes(&a.nome, &b.nome));

    Ok(match turma_id {
        Some(id) => todos.into_iter().filter(|v| v.turma_id == id).collect(),
        None => todos,
    })
}

pub async fn find_vendedor_by_id(
    store: &dyn KvStore,
    vendedor_id: &str,
) -> AppResult<Option<Vendedor>> {
    let todos: Vec<Vendedor> = storage::read_collection(store, Colecao::Vendedores).await?;
    Ok(todos.into_iter().find(|v| v.id == vendedor_id))
}

pub async fn save_vendedor(store: &dyn KvStore, vendedor: Vendedor) -> AppResult<()> {
    let mut todos: Vec<Vendedor> = storage::read_collection(store, Colecao::Vendedores).await?;
    tracing::debug!("Gravando participante '{}' (turma '{}').", vendedor.id, vendedor.turma_id);
    upsert_by_id(&mut todos, vendedor, |v| v.id.as_str());
    storage::write_collection(store, Colecao::Vendedores, &todos).await
}

pub async fn delete_vendedor(store: &dyn KvStore, vendedor_id: &str) -> AppResult<()> {
    let restantes: Vec<Vendedor> = storage::read_collection::<Vendedor>(store, Colecao::Vendedores)
        .await?
        .into_iter()
        .filter(|v| v.id != vendedor_id)
        .collect();
    tracing::info!("Participante '{}' removido.", vendedor_id);
    storage::write_collection(store, Colecao::Vendedores, &restantes).await
}

// Carrega, aplica a alteração e grava o registo inteiro de volta
async fn update_vendedor(
    store: &dyn KvStore,
    vendedor_id: &str,
    alterar: impl FnOnce(&mut Vendedor),
) -> AppResult<Option<Vendedor>> {
    let Some(mut vendedor) = find_vendedor_by_id(store, vendedor_id).await? else {
        tracing::warn!("Participante '{}' não encontrado.", vendedor_id);
        return Ok(None);
    };
    alterar(&mut vendedor);
    save_vendedor(store, vendedor.clone()).await?;
    Ok(Some(vendedor))
}

/// Inverte uma flag de acessos/fotos/presença e grava de imediato.
/// Devolve o registo atualizado, ou `None` se o id não existir.
pub async fn toggle_flag(
    store: &dyn KvStore,
    vendedor_id: &str,
    grupo: GrupoFlags,
    chave: &str,
) -> AppResult<Option<Vendedor>> {
    update_vendedor(store, vendedor_id, |v| {
        let novo = v.alternar_flag(grupo, chave);
        tracing::debug!("Flag {:?}/{} de '{}' agora {}.", grupo, chave, v.id, novo);
    })
    .await
}

/// Grava o texto de apresentação (o "commit" feito ao perder o foco).
pub async fn save_apresentacao(
    store: &dyn KvStore,
    vendedor_id: &str,
    texto: String,
) -> AppResult<Option<Vendedor>> {
    update_vendedor(store, vendedor_id, |v| v.apresentacao = Some(texto)).await
}

/// Regista a nota da prova. Entrada inválida (não numérica ou com mais de 3
/// dígitos) é ignorada em silêncio: devolve o registo tal como está, sem gravar.
pub async fn record_prova(
    store: &dyn KvStore,
    vendedor_id: &str,
    nota: &str,
) -> AppResult<Option<Vendedor>> {
    if !nota_valida(nota) {
        tracing::debug!("Nota '{}' rejeitada para '{}'.", nota, vendedor_id);
        return find_vendedor_by_id(store, vendedor_id).await;
    }
    let nota = nota.to_string();
    update_vendedor(store, vendedor_id, |v| {
        v.prova = if nota.is_empty() { None } else { Some(nota) };
    })
    .await
}

/// Telefone do supervisor pelo nome (sem diferenciar maiúsculas).
///
/// Procura linear sobre todos os registos; em caso de nomes repetidos ganha o
/// primeiro na ordem da listagem.
pub async fn supervisor_phone(store: &dyn KvStore, nome: &str) -> AppResult<Option<String>> {
    if nome.trim().is_empty() {
        return Ok(None);
    }
    let todos = find_all_vendedores(store, None).await?;
    Ok(todos
        .into_iter()
        .find(|c| mesmo_nome(&c.nome, nome))
        .map(|c| c.telefone)
        .filter(|tel| !tel.is_empty()))
}

/// Diretório de lideranças: todos os registos com o rótulo da turma.
/// Participantes órfãos aparecem com "Turma Removida".
pub async fn leadership_directory(
    store: &dyn KvStore,
    busca: Option<&str>,
) -> AppResult<Vec<ContatoLideranca>> {
    let turmas = turma_service::find_all_turmas(store).await?;
    let todos = find_all_vendedores(store, None).await?;
    let termo = busca.map(str::to_lowercase).unwrap_or_default();

    let contatos = todos
        .into_iter()
        .filter(|v| v.nome.to_lowercase().contains(&termo))
        .map(|v| {
            let turma_nome = turmas
                .iter()
                .find(|t| t.id == v.turma_id)
                .map_or_else(|| TURMA_REMOVIDA.to_string(), Turma::rotulo);
            let whatsapp = link_whatsapp(&v.telefone);
            ContatoLideranca {
                vendedor: v,
                turma_nome,
                whatsapp,
            }
        })
        .collect();
    Ok(contatos)
}

/// Candidatos a supervisor/coordenador/gerente (pelo `cargo`).
pub async fn leaders_by_role(store: &dyn KvStore, papel: Lideranca) -> AppResult<Vec<Vendedor>> {
    let todos = find_all_vendedores(store, None).await?;
    Ok(todos
        .into_iter()
        .filter(|v| papel.corresponde(v.cargo.as_deref()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use testresult::TestResult;

    fn vendedor(id: &str, turma_id: &str, nome: &str) -> Vendedor {
        Vendedor {
            id: id.into(),
            turma_id: turma_id.into(),
            nome: nome.into(),
            ..Vendedor::default()
        }
    }

    async fn store_with(vendedores: &[Vendedor]) -> AppResult<MemoryStore> {
        let store = MemoryStore::default();
        storage::write_collection(&store, Colecao::Vendedores, vendedores).await?;
        Ok(store)
    }

    fn ids(vendedores: &[Vendedor]) -> Vec<&str> {
        vendedores.iter().map(|v| v.id.as_str()).collect()
    }

    #[tokio::test]
    async fn listing_is_sorted_and_filter_preserves_order() -> TestResult {
        let store = store_with(&[
            vendedor("1", "A", "Zeca"),
            vendedor("2", "B", "bia"),
            vendedor("3", "A", "Ana"),
            vendedor("4", "A", "Érica"),
            vendedor("5", "B", "Carlos"),
        ])
        .await?;

        let todos = find_all_vendedores(&store, None).await?;
        assert_eq!(ids(&todos), ["3", "2", "5", "4", "1"]);

        let turma_a = find_all_vendedores(&store, Some("A")).await?;
        let esperado: Vec<&str> = todos
            .iter()
            .filter(|v| v.turma_id == "A")
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(ids(&turma_a), esperado);
        assert_eq!(ids(&turma_a), ["3", "4", "1"]);
        Ok(())
    }

    #[tokio::test]
    async fn sort_is_applied_at_read_time_only() -> TestResult {
        let store = store_with(&[vendedor("1", "A", "Zeca"), vendedor("2", "A", "Ana")]).await?;
        find_all_vendedores(&store, None).await?;
        let gravados: Vec<Vendedor> = storage::read_collection(&store, Colecao::Vendedores).await?;
        assert_eq!(ids(&gravados), ["1", "2"]);
        Ok(())
    }

    #[tokio::test]
    async fn toggle_inverts_and_persists() -> TestResult {
        let store = store_with(&[vendedor("v1", "A", "Ana")]).await?;

        let v = toggle_flag(&store, "v1", GrupoFlags::Acessos, "vpn").await?.ok_or("v1")?;
        assert!(v.flag(GrupoFlags::Acessos, "vpn"));
        let gravado = find_vendedor_by_id(&store, "v1").await?.ok_or("v1")?;
        assert_eq!(gravado, v);

        let v = toggle_flag(&store, "v1", GrupoFlags::Acessos, "vpn").await?.ok_or("v1")?;
        assert!(!v.flag(GrupoFlags::Acessos, "vpn"));
        let gravado = find_vendedor_by_id(&store, "v1").await?.ok_or("v1")?;
        assert_eq!(gravado, v);
        assert_eq!(gravado.acessos.and_then(|a| a.get("vpn").copied()), Some(false));
        Ok(())
    }

    #[tokio::test]
    async fn toggle_unknown_participant_returns_none() -> TestResult {
        let store = store_with(&[]).await?;
        assert!(toggle_flag(&store, "x", GrupoFlags::Fotos, "entrega").await?.is_none());
        assert!(find_all_vendedores(&store, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn score_rejects_invalid_input_silently() -> TestResult {
        let store = store_with(&[vendedor("v1", "A", "Ana")]).await?;

        for aceite in ["7", "42", "007"] {
            let v = record_prova(&store, "v1", aceite).await?.ok_or("v1")?;
            assert_eq!(v.prova.as_deref(), Some(aceite));
        }
        for rejeitada in ["12a", "1234", "ab"] {
            let v = record_prova(&store, "v1", rejeitada).await?.ok_or("v1")?;
            assert_eq!(v.prova.as_deref(), Some("007"));
        }
        let gravado = find_vendedor_by_id(&store, "v1").await?.ok_or("v1")?;
        assert_eq!(gravado.prova.as_deref(), Some("007"));

        let limpo = record_prova(&store, "v1", "").await?.ok_or("v1")?;
        assert_eq!(limpo.prova, None);
        Ok(())
    }

    #[tokio::test]
    async fn presentation_commit_persists_text() -> TestResult {
        let store = store_with(&[vendedor("v1", "A", "Ana")]).await?;
        save_apresentacao(&store, "v1", "Gosta de futebol".into()).await?;
        let gravado = find_vendedor_by_id(&store, "v1").await?.ok_or("v1")?;
        assert_eq!(gravado.apresentacao.as_deref(), Some("Gosta de futebol"));
        Ok(())
    }

    #[tokio::test]
    async fn supervisor_phone_matches_name_case_insensitively() -> TestResult {
        let mut joao = vendedor("s1", "", "João Lima");
        joao.telefone = "11 90000-0001".into();
        joao.cargo = Some("Supervisor(a)".into());
        let mut outro = vendedor("s2", "", "JOÃO LIMA");
        outro.telefone = "11 90000-0002".into();
        let store = store_with(&[joao, outro, vendedor("v1", "A", "Ana")]).await?;

        let tel = supervisor_phone(&store, "joão lima").await?;
        assert!(tel.is_some());
        assert_eq!(supervisor_phone(&store, "Desconhecido").await?, None);
        assert_eq!(supervisor_phone(&store, "").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn directory_labels_orphans_and_filters_by_name() -> TestResult {
        let store = store_with(&[
            vendedor("1", "t1", "Ana"),
            vendedor("2", "apagada", "Bruno"),
            vendedor("3", "t2", "Mariana"),
        ])
        .await?;
        turma_service::save_turma(
            &store,
            Turma {
                id: "t1".into(),
                nome: Some("Vendas SP".into()),
                ..Turma::default()
            },
        )
        .await?;
        turma_service::save_turma(
            &store,
            Turma {
                id: "t2".into(),
                ..Turma::default()
            },
        )
        .await?;

        let todos = leadership_directory(&store, None).await?;
        let rotulos: Vec<&str> = todos.iter().map(|c| c.turma_nome.as_str()).collect();
        assert_eq!(rotulos, ["Vendas SP", TURMA_REMOVIDA, "Turma t2"]);

        let filtrados = leadership_directory(&store, Some("ANA")).await?;
        let nomes: Vec<&str> = filtrados.iter().map(|c| c.vendedor.nome.as_str()).collect();
        assert_eq!(nomes, ["Ana", "Mariana"]);
        Ok(())
    }

    #[tokio::test]
    async fn leaders_are_picked_by_role() -> TestResult {
        let mut s = vendedor("1", "", "Sara");
        s.cargo = Some("Supervisor(a)".into());
        let mut g = vendedor("2", "", "Gil");
        g.cargo = Some("Gerente".into());
        let store = store_with(&[s, g, vendedor("3", "A", "Ana")]).await?;

        let supervisores = leaders_by_role(&store, Lideranca::Supervisor).await?;
        assert_eq!(ids(&supervisores), ["1"]);
        let gerentes = leaders_by_role(&store, Lideranca::Gerente).await?;
        assert_eq!(ids(&gerentes), ["2"]);
        assert!(leaders_by_role(&store, Lideranca::Coordenador).await?.is_empty());
        Ok(())
    }
}
