// src/web/mod.rs
pub mod auth_handlers;
pub mod lideranca_handlers;
pub mod mw_auth;
pub mod routes;
pub mod turma_handlers;
pub mod usuario_handlers;
pub mod vendedor_handlers;
