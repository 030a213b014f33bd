//! Shared access to a session with an in-flight guard.

use std::sync::Arc;

use teleops_core::entities::DesignVersion;
use tokio::sync::{Mutex, MutexGuard};

use crate::backend::VersionBackend;
use crate::error::DesignError;
use crate::session::DesignSession;

/// A cloneable handle to one [`DesignSession`].
///
/// `try_save` and `try_publish` refuse with [`DesignError::Busy`] instead of
/// queueing behind an operation that is still running.
pub struct SessionHandle<B> {
    inner: Arc<Mutex<DesignSession<B>>>,
}

impl<B> Clone for SessionHandle<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: VersionBackend> SessionHandle<B> {
    #[must_use]
    pub fn new(session: DesignSession<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Wait for exclusive access to the session.
    pub async fn lock(&self) -> MutexGuard<'_, DesignSession<B>> {
        self.inner.lock().await
    }

    /// Save unless another operation is running.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Busy`] while the session is held, otherwise
    /// whatever [`DesignSession::save`] returns.
    pub async fn try_save(&self) -> Result<DesignVersion, DesignError> {
        let mut session = self.inner.try_lock().map_err(|_| DesignError::Busy)?;
        session.save().await
    }

    /// Publish unless another operation is running.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Busy`] while the session is held, otherwise
    /// whatever [`DesignSession::publish`] returns.
    pub async fn try_publish(&self) -> Result<DesignVersion, DesignError> {
        let mut session = self.inner.try_lock().map_err(|_| DesignError::Busy)?;
        session.publish().await
    }
}
