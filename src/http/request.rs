//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser incremental que lee un request directamente del socket.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/8.4.0\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hola!
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path HTTP/1.1`, tokenizada byte a byte
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: exactamente `Content-Length` bytes (vacío si no hay header)

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{self, BufRead, Read};
use thiserror::Error;

/// Largo máximo de una línea (request line o header), sin contar el CRLF
pub const MAX_LINE_LEN: usize = 8 * 1024;

/// Cantidad máxima de headers aceptados por request
pub const MAX_HEADERS: usize = 100;

/// Métodos HTTP
///
/// Solo GET y POST tienen rutas; cualquier otro token se conserva tal cual
/// para que el dispatcher decida qué hacer con él.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// Cualquier otro método (HEAD, PUT, DELETE, ...)
    Other(String),
}

impl Method {
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token.as_str(),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Error)]
pub enum ParseError {
    /// El cliente cerró la conexión sin mandar nada
    #[error("connection closed before any request byte")]
    ConnectionClosed,

    /// Request line vacía
    #[error("request line has no method")]
    MissingMethod,

    #[error("request line has no path")]
    MissingPath,

    #[error("request line has no HTTP version")]
    MissingVersion,

    /// Header sin `:` o con nombre vacío
    #[error("malformed header: {0:?}")]
    MalformedHeader(String),

    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    #[error("line longer than {} bytes", MAX_LINE_LEN)]
    LineTooLong,

    #[error("more than {} headers", MAX_HEADERS)]
    TooManyHeaders,

    #[error("method, version or header is not valid UTF-8")]
    InvalidUtf8,

    /// EOF a mitad de los headers o del body
    #[error("connection closed in the middle of the request")]
    UnexpectedEof,

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Indica si el error se debe a un request malformado
    ///
    /// Los errores de cliente se responden con 400; el resto (I/O, EOF)
    /// corta la conexión sin respuesta.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ParseError::ConnectionClosed | ParseError::UnexpectedEof | ParseError::Io(_)
        )
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// Path de la petición tal cual llegó (ej: "/echo/abc"); puede no ser UTF-8
    path: Vec<u8>,

    /// Versión HTTP, solo se conserva para logging
    version: String,

    /// Headers HTTP; los nombres distinguen mayúsculas
    headers: HashMap<String, String>,

    body: Vec<u8>,
}

/// Cursor sobre los bytes de la request line
struct Tokenizer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn is_separator(byte: u8) -> bool {
        byte == b' ' || byte == b'\t'
    }

    /// Retorna el siguiente token no vacío, o `None` al llegar al final
    fn next_token(&mut self) -> Option<&'a [u8]> {
        while self.pos < self.bytes.len() && Self::is_separator(self.bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos == self.bytes.len() {
            return None;
        }

        let start = self.pos;
        while self.pos < self.bytes.len() && !Self::is_separator(self.bytes[self.pos]) {
            self.pos += 1;
        }
        Some(&self.bytes[start..self.pos])
    }

    fn next_str(&mut self, missing: ParseError) -> Result<&'a str, ParseError> {
        let token = self.next_token().ok_or(missing)?;
        std::str::from_utf8(token).map_err(|_| ParseError::InvalidUtf8)
    }
}

impl Request {
    /// Parsea un request completo desde un buffer en memoria
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use files_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: curl/8.4.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), b"/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some("curl/8.4.0"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let mut reader = buffer;
        Self::read_from(&mut reader)
    }

    /// Lee un request desde un stream con buffer (normalmente el socket)
    ///
    /// Consume la request line, los headers hasta la línea vacía y luego
    /// exactamente `Content-Length` bytes de body.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let mut line = Vec::with_capacity(256);

        // 1. Request line
        if read_line(reader, &mut line)? == 0 {
            return Err(ParseError::ConnectionClosed);
        }
        let mut tokens = Tokenizer::new(&line);
        let method = Method::from_token(tokens.next_str(ParseError::MissingMethod)?);
        let path = tokens.next_token().ok_or(ParseError::MissingPath)?.to_vec();
        let version = tokens.next_str(ParseError::MissingVersion)?.to_string();

        // 2. Headers hasta la línea vacía
        let mut headers = HashMap::new();
        loop {
            if read_line(reader, &mut line)? == 0 {
                return Err(ParseError::UnexpectedEof);
            }
            if line.is_empty() {
                break;
            }
            if headers.len() >= MAX_HEADERS {
                return Err(ParseError::TooManyHeaders);
            }
            let (name, value) = Self::parse_header(&line)?;
            headers.insert(name, value);
        }

        // 3. Body
        let body = match Self::content_length(&headers)? {
            Some(len) => Self::read_body(reader, len)?,
            None => Vec::new(),
        };

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Separa un header en el primer `:`
    ///
    /// El nombre se guarda tal cual; al valor se le quitan los espacios de
    /// los extremos, así `Name:value` y `Name: value` son equivalentes.
    fn parse_header(line: &[u8]) -> Result<(String, String), ParseError> {
        let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidUtf8)?;
        match line.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.to_string(), value.trim().to_string()))
            }
            _ => Err(ParseError::MalformedHeader(line.to_string())),
        }
    }

    fn content_length(headers: &HashMap<String, String>) -> Result<Option<u64>, ParseError> {
        let value = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("Content-Length"))
            .map(|(_, value)| value);

        match value {
            Some(value) => value
                .parse::<u64>()
                .map(Some)
                .map_err(|_| ParseError::InvalidContentLength(value.clone())),
            None => Ok(None),
        }
    }

    fn read_body<R: BufRead>(reader: &mut R, len: u64) -> Result<Vec<u8>, ParseError> {
        // El Vec crece a medida que llegan bytes; un Content-Length enorme
        // no reserva memoria por adelantado.
        let mut body = Vec::new();
        reader.by_ref().take(len).read_to_end(&mut body)?;
        if (body.len() as u64) < len {
            return Err(ParseError::UnexpectedEof);
        }
        Ok(body)
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path crudo, byte a byte
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// Path para logs; los bytes no UTF-8 se reemplazan por `U+FFFD`
    pub fn path_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.path)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (el nombre distingue mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Lee una línea terminada en `\n` y le quita el CRLF
///
/// Retorna la cantidad de bytes consumidos del stream (0 en EOF). Una línea
/// de hasta `MAX_LINE_LEN` bytes más su CRLF se acepta.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<usize, ParseError> {
    buf.clear();
    let consumed = reader
        .by_ref()
        .take(MAX_LINE_LEN as u64 + 2)
        .read_until(b'\n', buf)?;

    if consumed == 0 {
        return Ok(0);
    }
    if buf.last() != Some(&b'\n') {
        if buf.len() > MAX_LINE_LEN {
            return Err(ParseError::LineTooLong);
        }
        return Err(ParseError::UnexpectedEof);
    }

    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if buf.len() > MAX_LINE_LEN {
        return Err(ParseError::LineTooLong);
    }
    Ok(consumed)
}
