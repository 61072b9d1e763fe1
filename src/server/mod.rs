//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto (4221 por defecto)
//! 2. Acepta conexiones y lanza un thread por cada una, con un tope de
//!    conexiones simultáneas
//! 3. Cada thread lee y parsea un request, lo despacha y responde
//! 4. La conexión se cierra después de la respuesta

pub mod limiter;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use crate::error::ServerError;
pub use limiter::ConnectionLimiter;
pub use tcp::Server;
