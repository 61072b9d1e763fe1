//! # Comandos de Archivos
//! src/commands/files.rs
//!
//! Lectura y escritura de archivos dentro del directorio servido:
//! - GET /files/{nombre}: Devuelve el contenido del archivo
//! - POST /files/{nombre}: Crea o sobrescribe el archivo con el body
//!
//! No hay locking: un GET y un POST concurrentes sobre el mismo archivo
//! pueden cruzarse.

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteError;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Prefijo de las rutas de archivos
pub const FILES_PREFIX: &str = "/files/";

/// Permisos con los que se crean los archivos (se aplica el umask)
#[cfg(unix)]
const FILE_MODE: u32 = 0o666;

/// Resuelve `/files/{nombre}` a una ruta dentro de `directory`
///
/// Retorna `None` si el nombre está vacío o intenta salir del directorio
/// (componentes `..`, rutas absolutas, bytes NUL). En Unix el nombre se usa
/// byte a byte; en otras plataformas tiene que ser UTF-8.
pub fn resolve_file_path(directory: &Path, path: &[u8]) -> Option<PathBuf> {
    let name = path.strip_prefix(FILES_PREFIX.as_bytes())?;
    if name.is_empty() || name.contains(&0) {
        return None;
    }

    let relative = bytes_to_path(name)?;
    let only_normal = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !only_normal {
        return None;
    }

    Some(directory.join(relative))
}

/// Handler para GET /files/{nombre}
///
/// - Archivo existente: 200, `application/octet-stream`, bytes exactos
/// - Archivo inexistente: 404 sin body
/// - Cualquier otro error de I/O se propaga y la conexión se corta
pub fn read_file_handler(req: &Request, directory: &Path) -> Result<Response, RouteError> {
    let Some(path) = resolve_file_path(directory, req.path()) else {
        return Ok(Response::new(StatusCode::BadRequest));
    };

    match fs::read(&path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "file read");
            Ok(Response::new(StatusCode::Ok).with_body("application/octet-stream", content))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Response::new(StatusCode::NotFound)),
        Err(source) => Err(RouteError::Io { path, source }),
    }
}

/// Handler para POST /files/{nombre}
///
/// Escribe el body completo del request y responde 201 sin body.
pub fn write_file_handler(req: &Request, directory: &Path) -> Result<Response, RouteError> {
    let Some(path) = resolve_file_path(directory, req.path()) else {
        return Ok(Response::new(StatusCode::BadRequest));
    };

    write_file(&path, req.body()).map_err(|source| RouteError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = req.body().len(), "file written");

    Ok(Response::new(StatusCode::Created))
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> Option<&Path> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Some(Path::new(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> Option<&Path> {
    std::str::from_utf8(bytes).ok().map(Path::new)
}

fn write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    #[test]
    fn test_resolve_file_path() {
        let dir = Path::new("/srv/files");

        assert_eq!(
            resolve_file_path(dir, b"/files/a.txt"),
            Some(PathBuf::from("/srv/files/a.txt"))
        );
        assert_eq!(
            resolve_file_path(dir, b"/files/sub/b.bin"),
            Some(PathBuf::from("/srv/files/sub/b.bin"))
        );
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let dir = Path::new("/srv/files");

        assert_eq!(resolve_file_path(dir, b"/files/"), None);
        assert_eq!(resolve_file_path(dir, b"/files/../etc/passwd"), None);
        assert_eq!(resolve_file_path(dir, b"/files/a/../../b"), None);
        assert_eq!(resolve_file_path(dir, b"/files//etc/passwd"), None);
        assert_eq!(resolve_file_path(dir, b"/files/a\0b"), None);
        assert_eq!(resolve_file_path(dir, b"/echo/a"), None);
    }

    #[test]
    fn test_read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("datos.bin"), [0x00u8, 0x7F, 0xFF]).unwrap();

        let request = make_request(b"GET /files/datos.bin HTTP/1.1\r\n\r\n");
        let response = read_file_handler(&request, dir.path()).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("application/octet-stream"));
        assert_eq!(response.header("Content-Length"), Some("3"));
        assert_eq!(response.body(), &[0x00u8, 0x7F, 0xFF]);
    }

    #[test]
    fn test_read_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();

        let request = make_request(b"GET /files/no-existe HTTP/1.1\r\n\r\n");
        let response = read_file_handler(&request, dir.path()).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("carpeta")).unwrap();

        let request = make_request(b"GET /files/carpeta HTTP/1.1\r\n\r\n");
        let result = read_file_handler(&request, dir.path());

        assert!(matches!(result, Err(RouteError::Io { .. })));
    }

    #[test]
    fn test_read_traversal_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();

        let request = make_request(b"GET /files/../secreto HTTP/1.1\r\n\r\n");
        let response = read_file_handler(&request, dir.path()).unwrap();

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();

        let request = make_request(b"POST /files/nuevo.txt HTTP/1.1\r\nContent-Length: 4\r\n\r\nhola");
        let response = write_file_handler(&request, dir.path()).unwrap();

        assert_eq!(response.status(), StatusCode::Created);
        assert!(response.body().is_empty());
        assert_eq!(fs::read(dir.path().join("nuevo.txt")).unwrap(), b"hola");
    }

    #[test]
    fn test_write_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f"), b"contenido largo anterior").unwrap();

        let request = make_request(b"POST /files/f HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc");
        write_file_handler(&request, dir.path()).unwrap();

        assert_eq!(fs::read(dir.path().join("f")).unwrap(), b"abc");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name_roundtrip() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();

        let request = make_request(b"POST /files/\xffdatos HTTP/1.1\r\nContent-Length: 2\r\n\r\nok");
        let response = write_file_handler(&request, dir.path()).unwrap();
        assert_eq!(response.status(), StatusCode::Created);
        assert_eq!(fs::read(dir.path().join(OsStr::from_bytes(b"\xffdatos"))).unwrap(), b"ok");

        let request = make_request(b"GET /files/\xffdatos HTTP/1.1\r\n\r\n");
        let response = read_file_handler(&request, dir.path()).unwrap();
        assert_eq!(response.body(), b"ok");
    }

    #[test]
    fn test_write_into_missing_subdirectory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let request = make_request(b"POST /files/no/existe HTTP/1.1\r\nContent-Length: 1\r\n\r\nx");
        let result = write_file_handler(&request, dir.path());

        assert!(matches!(result, Err(RouteError::Io { .. })));
    }
}
