//! Errores del servidor

use crate::http::ParseError;
use crate::router::RouteError;
use thiserror::Error;

/// Errores de arranque y de manejo de una conexión
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("initialization error: {0}")]
    Init(String),

    #[error("request parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ServerError::from(ParseError::UnexpectedEof);
        assert!(err.to_string().starts_with("request parse failed: "));
        assert!(!err.to_string().contains("bad request"));
    }

    #[test]
    fn test_bind_error_keeps_source() {
        use std::error::Error as _;

        let err = ServerError::Bind {
            address: "0.0.0.0:4221".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().starts_with("failed to bind 0.0.0.0:4221: "));
        assert!(err.source().is_some());
    }
}
