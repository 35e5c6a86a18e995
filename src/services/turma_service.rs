// src/services/turma_service.rs
use crate::{
    error::AppResult,
    models::{turma::Turma, vendedor::Vendedor},
    services::upsert_by_id,
    storage::{self, Colecao, KvStore},
};
use std::collections::HashMap;

/// Todas as turmas, na ordem em que estão gravadas.
pub async fn find_all_turmas(store: &dyn KvStore) -> AppResult<Vec<Turma>> {
    storage::read_collection(store, Colecao::Turmas).await
}

pub async fn find_turma_by_id(store: &dyn KvStore, turma_id: &str) -> AppResult<Option<Turma>> {
    let turmas = find_all_turmas(store).await?;
    Ok(turmas.into_iter().find(|t| t.id == turma_id))
}

/// Substitui pelo id ou acrescenta. Não valida datas: é responsabilidade de quem chama.
pub async fn save_turma(store: &dyn KvStore, turma: Turma) -> AppResult<()> {
    let mut turmas = find_all_turmas(store).await?;
    tracing::info!("Gravando turma '{}'.", turma.id);
    upsert_by_id(&mut turmas, turma, |t| t.id.as_str());
    storage::write_collection(store, Colecao::Turmas, &turmas).await
}

/// Apaga a turma e, em cascata, todos os participantes com esse `turmaId`.
///
/// As duas coleções são lidas e filtradas por inteiro e depois gravadas num
/// único `set_many`, para não deixar participantes órfãos a meio.
pub async fn delete_turma(store: &dyn KvStore, turma_id: &str) -> AppResult<()> {
    let turmas: Vec<Turma> = find_all_turmas(store)
        .await?
        .into_iter()
        .filter(|t| t.id != turma_id)
        .collect();

    let todos: Vec<Vendedor> = storage::read_collection(store, Colecao::Vendedores).await?;
    let antes = todos.len();
    let restantes: Vec<Vendedor> = todos.into_iter().filter(|v| v.turma_id != turma_id).collect();

    store
        .set_many(vec![
            storage::encode_collection(Colecao::Turmas, &turmas)?,
            storage::encode_collection(Colecao::Vendedores, &restantes)?,
        ])
        .await?;

    tracing::info!(
        "🗑️ Turma '{}' removida com {} participante(s).",
        turma_id,
        antes - restantes.len()
    );
    Ok(())
}

/// Número de participantes por turma (só turmas com participantes aparecem).
pub async fn count_participants(store: &dyn KvStore) -> AppResult<HashMap<String, usize>> {
    let vendedores: Vec<Vendedor> = storage::read_collection(store, Colecao::Vendedores).await?;
    let mut counts = HashMap::new();
    for v in vendedores {
        *counts.entry(v.turma_id).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Dados de demonstração, gravados apenas se a chave de turmas nunca existiu.
pub async fn seed_demo_data(store: &dyn KvStore) -> AppResult<()> {
    if storage::exists(store, Colecao::Turmas).await? {
        return Ok(());
    }
    tracing::info!("🌱 Gravando turmas de demonstração.");

    let turmas = vec![
        Turma {
            id: "1".into(),
            nome: Some("Turma A".into()),
            data_inicial: "2023-10-01".into(),
            data_entrega: "2023-12-15".into(),
            sin: "120".into(),
            jump: "45".into(),
        },
        Turma {
            id: "2".into(),
            nome: Some("Turma B".into()),
            data_inicial: "2023-11-05".into(),
            data_entrega: "2024-01-20".into(),
            sin: "95".into(),
            jump: "30".into(),
        },
    ];

    let vendedores = vec![
        Vendedor {
            id: "101".into(),
            turma_id: "1".into(),
            nome: "Carlos Silva".into(),
            matricula: "12345".into(),
            usuario: "csilva".into(),
            id_claro: "C001".into(),
            regional: "SP".into(),
            canal: "VAREJO".into(),
            cidade: "São Paulo".into(),
            uf: "SP".into(),
            supervisor: "João".into(),
            coordenador: "Maria".into(),
            gerente: "Pedro".into(),
            telefone: "11999999999".into(),
            email: "carlos@example.com".into(),
            dn: "01/01/1990".into(),
            ..Vendedor::default()
        },
        Vendedor {
            id: "102".into(),
            turma_id: "1".into(),
            nome: "Ana Souza".into(),
            matricula: "67890".into(),
            usuario: "asouza".into(),
            id_claro: "C002".into(),
            regional: "RJ".into(),
            canal: "PME".into(),
            cidade: "Rio de Janeiro".into(),
            uf: "RJ".into(),
            supervisor: "Carlos".into(),
            coordenador: "Ana".into(),
            gerente: "Beto".into(),
            telefone: "21988888888".into(),
            email: "ana@example.com".into(),
            dn: "15/05/1992".into(),
            ..Vendedor::default()
        },
    ];

    store
        .set_many(vec![
            storage::encode_collection(Colecao::Turmas, &turmas)?,
            storage::encode_collection(Colecao::Vendedores, &vendedores)?,
        ])
        .await
}
