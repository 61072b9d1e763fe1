//! # Módulo HTTP
//!
//! Implementa a mano la parte de HTTP/1.1 que necesita el servidor:
//!
//! - Parsing de requests (request line, headers, body por `Content-Length`)
//! - Construcción y envío de responses
//! - Tabla de status codes
//!
//! No hay keep-alive, chunked encoding ni compresión: cada conexión lleva
//! exactamente un request y una response.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! User-Agent: curl/8.4.0\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
