//! # Límite de Conexiones Simultáneas
//! src/server/limiter.rs
//!
//! Cada conexión aceptada corre en su propio thread, así un cliente que no
//! manda nada solo bloquea su propio thread. El límite acota cuántos threads
//! hay vivos a la vez: si está lleno, `submit` devuelve el item para que el
//! llamador decida (el servidor responde 503).
//!
//! ```text
//! accept() ──submit──▶ active < max ? ──sí──▶ thread conn-N ──▶ handler
//!                                    └─no──▶ Err(item)
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use tracing::{debug, error};

struct Shared {
    active: Mutex<usize>,

    /// Notifica cuando termina una conexión
    released: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, usize> {
        // El lock solo protege un contador: un panic no lo deja a medias.
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Libera el lugar al terminar el thread, aunque el handler haga panic
struct Slot {
    shared: Arc<Shared>,
}

impl Drop for Slot {
    fn drop(&mut self) {
        let mut active = self.shared.lock();
        *active = active.saturating_sub(1);
        self.shared.released.notify_all();
    }
}

/// Lanza un thread por item, con un máximo de threads vivos
pub struct ConnectionLimiter<T: Send + 'static> {
    shared: Arc<Shared>,
    max_connections: usize,
    handler: Arc<dyn Fn(T) + Send + Sync>,
    next_id: AtomicUsize,
}

impl<T: Send + 'static> ConnectionLimiter<T> {
    /// Crea el limitador; cada item aceptado se procesa con `handler`
    ///
    /// # Ejemplo
    /// ```
    /// use files_server::server::ConnectionLimiter;
    /// use std::sync::mpsc;
    /// use std::sync::Mutex;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let tx = Mutex::new(tx);
    /// let limiter = ConnectionLimiter::new(8, move |n: u32| {
    ///     tx.lock().unwrap().send(n * 2).unwrap();
    /// });
    /// limiter.submit(21).unwrap();
    ///
    /// assert_eq!(rx.recv().unwrap(), 42);
    /// ```
    pub fn new<F>(max_connections: usize, handler: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                active: Mutex::new(0),
                released: Condvar::new(),
            }),
            max_connections,
            handler: Arc::new(handler),
            next_id: AtomicUsize::new(0),
        }
    }

    /// Lanza un thread para `item`
    ///
    /// Retorna `Err(item)` si ya hay `max_connections` threads vivos. Si el
    /// sistema no deja crear el thread, el item se descarta y se loguea.
    pub fn submit(&self, item: T) -> Result<(), T> {
        {
            let mut active = self.shared.lock();
            if *active >= self.max_connections {
                return Err(item);
            }
            *active += 1;
        }

        let slot = Slot {
            shared: Arc::clone(&self.shared),
        };
        let handler = Arc::clone(&self.handler);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", id))
            .spawn(move || {
                let _slot = slot;
                handler(item);
            });

        // Si falla el spawn, el closure (y con él el Slot) ya se liberó
        if let Err(e) = spawned {
            error!(error = %e, "failed to spawn connection thread");
        } else {
            debug!(connection = id, "connection thread started");
        }

        Ok(())
    }

    /// Threads de conexión vivos en este momento
    pub fn active(&self) -> usize {
        *self.shared.lock()
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Bloquea hasta que no quede ninguna conexión en curso
    pub fn wait_idle(&self) {
        let mut active = self.shared.lock();
        while *active > 0 {
            active = self
                .shared
                .released
                .wait(active)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}
