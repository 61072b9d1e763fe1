//! # Files Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: parsea el request del
//! socket, lo despacha a un puñado de rutas fijas y arma la respuesta a mano.
//!
//! ## Rutas
//!
//! - `GET /`: 200 vacío
//! - `GET /echo/{texto}`: devuelve `{texto}`
//! - `GET /user-agent`: devuelve el header `User-Agent`
//! - `GET /files/{nombre}`: contenido de `{directorio}/{nombre}` o 404
//! - `POST /files/{nombre}`: escribe el body en `{directorio}/{nombre}`, 201
//!
//! ## Arquitectura
//!
//! - `http`: Parsing de requests, construcción de responses, status codes
//! - `router`: Tabla de decisión método/path → handler
//! - `commands`: Implementación de cada ruta
//! - `server`: Acceptor TCP y un thread por conexión con tope de concurrencia
//! - `config`: Argumentos CLI y variables de entorno
//! - `logging`: Inicialización de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use files_server::config::Config;
//! use files_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al iniciar servidor");
//! server.run().expect("Error en el loop de accept");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;

pub use error::{Result, ServerError};
