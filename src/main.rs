//! # Files Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y corre el servidor.

use files_server::config::Config;
use files_server::logging;
use files_server::server::Server;
use tracing::error;

fn main() {
    let config = Config::new();

    if let Err(e) = logging::init_tracing(&config.log_level) {
        eprintln!("Error al inicializar logging: {}", e);
        std::process::exit(1);
    }

    config.log_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "fatal startup error");
            std::process::exit(1);
        }
    };

    // Bloquea el thread principal en el loop de accept
    if let Err(e) = server.run() {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
