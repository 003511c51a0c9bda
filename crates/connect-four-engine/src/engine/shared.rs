use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::MoveError;

use super::{
    game_engine::{GameEngine, Placement},
    snapshot::GameSnapshot,
};

/// A [`GameEngine`] behind a mutex, for hosts where input and rendering run
/// on different threads.
///
/// Every move and every read takes the lock, so a renderer never observes a
/// half-applied move. A poisoned lock is recovered: the engine only mutates
/// after all validation has passed, so its state stays consistent.
#[derive(Debug, Clone, Default)]
pub struct SharedGameEngine {
    inner: Arc<Mutex<GameEngine>>,
}

impl From<GameEngine> for SharedGameEngine {
    fn from(engine: GameEngine) -> Self {
        Self::new(engine)
    }
}

impl SharedGameEngine {
    #[must_use]
    pub fn new(engine: GameEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, GameEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn play_column(&self, column: isize) -> Result<Placement, MoveError> {
        self.lock().play_column(column)
    }

    /// Runs `f` with shared access to the engine while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&GameEngine) -> R) -> R {
        f(&self.lock())
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    /// Replaces the game with `engine` and returns the old one.
    pub fn replace(&self, engine: GameEngine) -> GameEngine {
        std::mem::replace(&mut *self.lock(), engine)
    }
}
