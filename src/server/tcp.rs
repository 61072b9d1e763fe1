//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! El acceptor corre en el thread que llama a [`Server::run`] y lanza un
//! thread por conexión a través de un [`ConnectionLimiter`]. Cada conexión
//! atiende exactamente un request y se cierra.

use super::limiter::ConnectionLimiter;
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::http::{ParseError, Request, Response, StatusCode};
use crate::router::Router;
use std::io::BufReader;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Timeout para escribir el 503 desde el thread del acceptor
const REJECT_WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Servidor HTTP/1.1, un thread por conexión
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: TcpListener,
}

impl Server {
    /// Valida la configuración y hace bind del socket
    ///
    /// Un error acá es fatal para el proceso.
    pub fn bind(config: Config) -> Result<Self> {
        config.validate().map_err(ServerError::Config)?;
        let directory = config.serving_dir()?;

        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

        let router = Router::new(directory);
        info!(address = %address, directory = %router.directory().display(), "server listening");

        Ok(Self {
            config,
            router: Arc::new(router),
            listener,
        })
    }

    /// Dirección real del socket (útil cuando se usa el puerto 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Loop de accept; no retorna mientras el listener siga abierto
    ///
    /// Un error de accept se loguea y el loop sigue con la próxima conexión.
    pub fn run(&self) -> Result<()> {
        let router = Arc::clone(&self.router);
        let io_timeout = self.config.io_timeout();

        let limiter = ConnectionLimiter::new(self.config.max_connections, move |stream: TcpStream| {
            if let Err(e) = Self::prepare_stream(&stream, io_timeout) {
                warn!(error = %e, "failed to configure socket");
                return;
            }
            if let Err(e) = Self::handle_connection(stream, &router) {
                warn!(error = %e, "connection dropped");
            }
        });

        info!(
            max_connections = limiter.max_connections(),
            io_timeout_ms = io_timeout.map_or(0, |t| t.as_millis() as u64),
            "accepting connections"
        );

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(stream) = limiter.submit(stream) {
                        warn!(active = limiter.active(), "connection limit reached, rejecting");
                        Self::reject_connection(stream);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                }
            }
        }

        Ok(())
    }

    fn prepare_stream(stream: &TcpStream, timeout: Option<Duration>) -> std::io::Result<()> {
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)
    }

    /// Responde 503 desde el acceptor y cierra
    fn reject_connection(mut stream: TcpStream) {
        let _ = stream.set_write_timeout(Some(REJECT_WRITE_TIMEOUT));
        if let Err(e) = Response::new(StatusCode::ServiceUnavailable).send(&mut stream) {
            debug!(error = %e, "failed to send 503");
        }
    }

    /// Atiende una conexión: parsea, despacha y escribe la respuesta
    ///
    /// - Request malformado: responde 400
    /// - Cliente que cierra sin mandar nada: Ok sin respuesta
    /// - Error de lectura o de I/O de archivos: Err, la conexión se cierra
    ///   sin respuesta
    pub(crate) fn handle_connection(mut stream: TcpStream, router: &Router) -> Result<()> {
        let start = Instant::now();
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let parsed = {
            let mut reader = BufReader::new(&stream);
            Request::read_from(&mut reader)
        };

        let request = match parsed {
            Ok(request) => request,
            Err(ParseError::ConnectionClosed) => {
                debug!(%peer, "connection closed without request");
                return Ok(());
            }
            Err(e) if e.is_client_error() => {
                warn!(%peer, error = %e, "malformed request");
                Response::new(StatusCode::BadRequest).send(&mut stream)?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let path = request.path_lossy();
        debug!(
            %peer,
            method = %request.method(),
            path = %path,
            version = request.version(),
            headers = request.headers().len(),
            body_len = request.body().len(),
            "request parsed"
        );

        let response = router.route(&request)?;
        response.send(&mut stream)?;

        let status = response.status();
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        if status.is_server_error() {
            warn!(
                %peer,
                method = %request.method(),
                path = %path,
                status = status.as_u16(),
                latency_ms,
                "request failed"
            );
        } else if status.is_client_error() {
            info!(
                %peer,
                method = %request.method(),
                path = %path,
                status = status.as_u16(),
                latency_ms,
                "request rejected"
            );
        } else {
            info!(
                %peer,
                method = %request.method(),
                path = %path,
                status = status.as_u16(),
                latency_ms,
                "request served"
            );
        }

        Ok(())
    }
}
