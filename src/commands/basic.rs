//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! Handlers que no tocan el filesystem:
//! - /: Respuesta vacía 200
//! - /echo/{texto}: Devuelve el texto del path
//! - /user-agent: Devuelve el header `User-Agent`

use crate::http::{Request, Response, StatusCode};

/// Prefijo de la ruta de echo
pub const ECHO_PREFIX: &str = "/echo/";

/// Handler para `/`
pub fn root_handler(_req: &Request) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para /echo/{texto}
///
/// El body es exactamente el resto del path, byte a byte y sin decodificar.
///
/// # Ejemplo
/// ```text
/// GET /echo/abc HTTP/1.1  ->  200, text/plain, "abc"
/// ```
pub fn echo_handler(req: &Request) -> Response {
    let text = req
        .path()
        .strip_prefix(ECHO_PREFIX.as_bytes())
        .unwrap_or_default();

    Response::new(StatusCode::Ok).with_body("text/plain", text.to_vec())
}

/// Handler para /user-agent
///
/// Si el cliente no mandó `User-Agent` el body queda vacío.
pub fn user_agent_handler(req: &Request) -> Response {
    let agent = req.header("User-Agent").unwrap_or_default();

    Response::new(StatusCode::Ok).with_body("text/plain", agent.as_bytes().to_vec())
}

/// Handler para cualquier ruta desconocida
pub fn not_found_handler(_req: &Request) -> Response {
    Response::new(StatusCode::NotFound)
}
