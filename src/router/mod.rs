//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Tabla de decisión fija que elige el handler según método y path.
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Para GET, en este orden:
//!
//! | Path              | Handler                 |
//! |-------------------|-------------------------|
//! | `/echo/{texto}`   | `echo_handler`          |
//! | `/user-agent`     | `user_agent_handler`    |
//! | `/files/{nombre}` | `read_file_handler`     |
//! | `/`               | `root_handler`          |
//! | cualquier otro    | 404                     |
//!
//! Para POST solo existe `/files/{nombre}`. Cualquier otra combinación de
//! método y path responde 200 sin body.

use crate::commands;
use crate::http::{Method, Request, Response, StatusCode};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errores que cortan la conexión sin mandar respuesta
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("file I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Router con el directorio servido por `/files/`
#[derive(Debug, Clone)]
pub struct Router {
    directory: PathBuf,
}

impl Router {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// # Ejemplo
    /// ```
    /// use files_server::router::Router;
    /// use files_server::http::{Request, StatusCode};
    ///
    /// let router = Router::new(".");
    /// let request = Request::parse(b"GET /echo/hola HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.route(&request).unwrap();
    ///
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// assert_eq!(response.body(), b"hola");
    /// ```
    pub fn route(&self, request: &Request) -> Result<Response, RouteError> {
        let path = request.path();

        match request.method() {
            Method::GET => {
                if path.starts_with(commands::ECHO_PREFIX.as_bytes()) {
                    Ok(commands::echo_handler(request))
                } else if path == b"/user-agent" {
                    Ok(commands::user_agent_handler(request))
                } else if path.starts_with(commands::FILES_PREFIX.as_bytes()) {
                    commands::read_file_handler(request, &self.directory)
                } else if path == b"/" {
                    Ok(commands::root_handler(request))
                } else {
                    Ok(commands::not_found_handler(request))
                }
            }
            Method::POST if path.starts_with(commands::FILES_PREFIX.as_bytes()) => {
                commands::write_file_handler(request, &self.directory)
            }
            _ => Ok(Response::new(StatusCode::Ok)),
        }
    }
}
