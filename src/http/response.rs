//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! API para armar una respuesta y mandarla al cliente en una sola escritura.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use files_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_body("text/plain", b"abc".to_vec());
//!
//! let mut socket = Vec::new();
//! response.send(&mut socket).unwrap();
//! assert!(socket.ends_with(b"\r\n\r\nabc"));
//! ```

use super::StatusCode;
use std::collections::HashMap;
use std::io::{self, Write};

/// Versión que se escribe en la status line
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Código de estado HTTP, 200 por defecto
    status: StatusCode,

    /// Headers HTTP; el orden de serialización no está definido
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header (si ya existe, se sobrescribe)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el body junto con `Content-Type` y `Content-Length`
    ///
    /// # Ejemplo
    /// ```
    /// use files_server::http::Response;
    ///
    /// let mut response = Response::default();
    /// response.set_body("application/octet-stream", vec![0x00, 0xFF]);
    ///
    /// assert_eq!(response.header("Content-Length"), Some("2"));
    /// ```
    pub fn set_body(&mut self, content_type: &str, body: Vec<u8>) {
        self.add_header("Content-Type", content_type);
        self.add_header("Content-Length", &body.len().to_string());
        self.body = body;
    }

    /// Versión builder de [`Response::set_body`]
    pub fn with_body(mut self, content_type: &str, body: Vec<u8>) -> Self {
        self.set_body(content_type, body);
        self
    }

    /// Convierte la respuesta a los bytes que viajan por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        let status_line = format!("{} {}\r\n", HTTP_VERSION, self.status);
        result.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Escribe la respuesta completa con un único `write_all`
    pub fn send<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::NotFound);
        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_default_is_200() {
        assert_eq!(Response::default().status(), StatusCode::Ok);
    }

    #[test]
    fn test_set_body_sets_type_and_length() {
        let mut response = Response::default();
        response.set_body("text/plain", b"Hello World".to_vec());

        assert_eq!(response.body(), b"Hello World");
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Length"), Some("11"));
    }

    #[test]
    fn test_empty_body_still_has_length() {
        let response = Response::default().with_body("text/plain", Vec::new());
        assert_eq!(response.header("Content-Length"), Some("0"));
    }

    #[test]
    fn test_add_header_overwrites() {
        let mut response = Response::default();
        response.add_header("X-Custom", "uno");
        response.add_header("X-Custom", "dos");

        assert_eq!(response.header("X-Custom"), Some("dos"));
        assert_eq!(response.headers().len(), 1);
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::new(StatusCode::Ok).with_body("text/plain", b"Test".to_vec());

        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\nTest"));
    }

    #[test]
    fn test_bare_status_bytes() {
        let response = Response::new(StatusCode::Created);
        assert_eq!(response.to_bytes(), b"HTTP/1.1 201 Created\r\n\r\n");
    }

    #[test]
    fn test_send_writes_everything() {
        let response = Response::default().with_body("application/octet-stream", vec![0x00, 0x01, 0xFF]);
        let mut sink = Vec::new();
        response.send(&mut sink).unwrap();

        assert_eq!(sink, response.to_bytes());
        assert!(sink.ends_with(&[b'\r', b'\n', 0x00, 0x01, 0xFF]));
    }
}
