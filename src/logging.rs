//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing` una sola vez por proceso. `RUST_LOG` tiene prioridad
//! sobre el nivel que llega por configuración.

use crate::server::ServerError;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Instala el subscriber global de `tracing`
pub fn init_tracing(level: &str) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| ServerError::Init(e.to_string()))?;

    info!("Tracing initialized with level: {}", level);
    Ok(())
}
