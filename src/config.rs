//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./files_server --directory /tmp/archivos --port 4221 --max-connections 256
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! FILES_DIR=/tmp/archivos HTTP_PORT=4221 ./files_server
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "files_server")]
#[command(about = "Servidor HTTP/1.1 minimo: echo, user-agent y archivos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Directorio servido por /files/ (por defecto, el directorio actual)
    #[arg(short, long, env = "FILES_DIR")]
    pub directory: Option<PathBuf>,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    // === Conexiones ===

    /// Conexiones atendidas a la vez, una por thread.
    /// Si se llega al máximo se responde 503.
    #[arg(long = "max-connections", default_value = "1024", env = "HTTP_MAX_CONNECTIONS")]
    pub max_connections: usize,

    /// Timeout de lectura/escritura del socket en milisegundos (0 = sin timeout).
    /// Un cliente que no manda nada libera su lugar al vencer.
    #[arg(long = "read-timeout-ms", default_value = "10000", env = "HTTP_READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Nivel de logging si RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use files_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directorio servido; si no se configuró, el directorio de trabajo
    pub fn serving_dir(&self) -> std::io::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Timeout del socket, `None` si está deshabilitado
    pub fn io_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("Max connections must be >= 1".to_string());
        }

        let dir = self
            .serving_dir()
            .map_err(|e| format!("Cannot resolve serving directory: {}", e))?;
        if !dir.is_dir() {
            return Err(format!("Serving directory is not a directory: {}", dir.display()));
        }

        Ok(())
    }

    /// Loguea un resumen de la configuración
    pub fn log_summary(&self) {
        let dir = self
            .serving_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());

        info!(address = %self.address(), directory = %dir, "network");
        info!(
            max_connections = self.max_connections,
            read_timeout_ms = self.read_timeout_ms,
            "connections"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            directory: None,
            host: "0.0.0.0".to_string(),
            port: 4221,
            max_connections: 1024,
            read_timeout_ms: 10_000,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 4221);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_connections, 1024);
        assert_eq!(config.read_timeout_ms, 10_000);
        assert!(config.directory.is_none());
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_serving_dir_defaults_to_cwd() {
        let config = Config::default();
        assert_eq!(config.serving_dir().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_serving_dir_explicit() {
        let mut config = Config::default();
        config.directory = Some(PathBuf::from("/tmp/archivos"));
        assert_eq!(config.serving_dir().unwrap(), PathBuf::from("/tmp/archivos"));
    }

    #[test]
    fn test_io_timeout() {
        let mut config = Config::default();
        assert_eq!(config.io_timeout(), Some(Duration::from_secs(10)));

        config.read_timeout_ms = 250;
        assert_eq!(config.io_timeout(), Some(Duration::from_millis(250)));

        config.read_timeout_ms = 0;
        assert_eq!(config.io_timeout(), None);
    }

    #[test]
    fn test_validate_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.directory = Some(dir.path().to_path_buf());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_max_connections() {
        let mut config = Config::default();
        config.max_connections = 0;
        let result = config.validate();
        assert!(result.unwrap_err().contains("Max connections"));
    }

    #[test]
    fn test_validate_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.directory = Some(dir.path().join("no-existe"));
        let result = config.validate();
        assert!(result.unwrap_err().contains("not a directory"));
    }

    #[test]
    fn test_parse_cli_args() {
        let config = Config::try_parse_from([
            "files_server",
            "--directory",
            "/tmp/x",
            "--port",
            "9000",
            "--max-connections",
            "2",
            "--read-timeout-ms",
            "500",
        ])
        .unwrap();

        assert_eq!(config.directory, Some(PathBuf::from("/tmp/x")));
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.io_timeout(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_config_log_summary() {
        // No debe hacer panic sin subscriber
        Config::default().log_summary();
    }
}
