//! # Comandos del Servidor
//!
//! Handlers de cada ruta. El [`Router`](crate::router::Router) decide cuál
//! ejecutar; cada handler recibe el request y arma la response.
//!
//! - **basic**: `/`, `/echo/{texto}`, `/user-agent`, 404
//! - **files**: `GET` y `POST` sobre `/files/{nombre}`

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;
