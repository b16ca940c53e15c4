//! Single-flight lazy pool
//!
//! The first caller starts initialization on its own task; callers that
//! arrive while it is running join the same attempt and see the same
//! result. A success is cached for the life of the process. A failure
//! clears the slot so the next call starts a fresh attempt instead of
//! replaying the old error.
//!
//! The attempt settles the slot itself, so a caller that gives up early
//! (request deadline, client disconnect) neither aborts the attempt nor
//! leaves a stale result behind for a later request.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use sqlx::PgPool;

use super::pool::{init_pool, PoolError};
use crate::config::DbConfig;

type Attempt<P> = Shared<BoxFuture<'static, Result<P, Arc<PoolError>>>>;
type Initializer<P> = Box<dyn Fn() -> BoxFuture<'static, Result<P, PoolError>> + Send + Sync>;

enum Slot<P> {
    Empty,
    Pending { attempt: u64, fut: Attempt<P> },
    Ready(P),
}

struct Inner<P> {
    slot: Slot<P>,
    attempts: u64,
}

impl<P> Inner<P> {
    /// Store the outcome of `attempt` unless a newer attempt owns the slot.
    fn settle(&mut self, attempt: u64, result: &Result<P, Arc<PoolError>>)
    where
        P: Clone,
    {
        if !matches!(&self.slot, Slot::Pending { attempt: current, .. } if *current == attempt) {
            return;
        }
        self.slot = match result {
            Ok(pool) => Slot::Ready(pool.clone()),
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Pool initialization failed, next call will retry");
                Slot::Empty
            }
        };
    }
}

/// Lazily initialized, shareable pool handle
pub struct LazyPool<P> {
    inner: Arc<Mutex<Inner<P>>>,
    init: Initializer<P>,
}

/// The Postgres pool used by the stores
pub type SharedPool = LazyPool<PgPool>;

impl<P> LazyPool<P>
where
    P: Clone + Send + Sync + 'static,
{
    /// Wrap an initializer. Nothing runs until the first [`get`](Self::get).
    pub fn new<F, Fut>(init: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<P, PoolError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                slot: Slot::Empty,
                attempts: 0,
            })),
            init: Box::new(move || init().boxed()),
        }
    }

    /// Return the pool, initializing it if needed.
    ///
    /// Must be called from within a Tokio runtime: a fresh attempt is
    /// spawned onto it.
    pub async fn get(&self) -> Result<P, Arc<PoolError>> {
        let (attempt, fut) = {
            let mut inner = lock(&self.inner);
            match &inner.slot {
                Slot::Ready(pool) => return Ok(pool.clone()),
                Slot::Pending { attempt, fut } => (*attempt, fut.clone()),
                Slot::Empty => {
                    inner.attempts += 1;
                    let attempt = inner.attempts;
                    let fut = self.spawn_attempt(attempt);
                    inner.slot = Slot::Pending {
                        attempt,
                        fut: fut.clone(),
                    };
                    tracing::debug!(attempt, "Starting pool initialization");
                    (attempt, fut)
                }
            }
        };

        let result = fut.await;

        // Normally already settled by the attempt task; covers a task that
        // panicked or was cancelled before it could do so.
        if result.is_err() {
            lock(&self.inner).settle(attempt, &result);
        }
        result
    }

    /// Run one attempt on its own task and expose its result as a shared future.
    fn spawn_attempt(&self, attempt: u64) -> Attempt<P> {
        let init = (self.init)();
        let inner = Arc::clone(&self.inner);

        let handle = tokio::spawn(async move {
            let result = init.await.map_err(Arc::new);
            lock(&inner).settle(attempt, &result);
            result
        });

        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => Err(Arc::new(PoolError::Aborted(e))),
            }
        }
        .boxed()
        .shared()
    }

    /// Return the pool only if a previous call already built it.
    pub fn get_if_ready(&self) -> Option<P> {
        match &lock(&self.inner).slot {
            Slot::Ready(pool) => Some(pool.clone()),
            _ => None,
        }
    }

    /// Number of initialization attempts started so far
    pub fn attempts(&self) -> u64 {
        lock(&self.inner).attempts
    }
}

fn lock<P>(inner: &Mutex<Inner<P>>) -> MutexGuard<'_, Inner<P>> {
    // The guarded state is always left consistent, so a poisoned lock is still usable
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

impl SharedPool {
    /// Lazy Postgres pool built from `config` on first use
    pub fn postgres(config: DbConfig) -> Self {
        let config = Arc::new(config);
        Self::new(move || {
            let config = Arc::clone(&config);
            async move { init_pool(&config).await }
        })
    }
}
