//! Lazily established, process-wide messaging session.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::Result;
use crate::traits::{MessageReader, SessionConnector};

/// Owns at most one live messaging session.
///
/// The session is established on the first [`get`](Self::get). Concurrent
/// first callers share a single in-flight establishment. A failed
/// establishment is not remembered, so the next call tries again; once a
/// session is up it is reused for the life of the manager.
pub struct SessionManager {
    connector: Arc<dyn SessionConnector>,
    session: OnceCell<Arc<dyn MessageReader>>,
}

impl SessionManager {
    pub fn new(connector: Arc<dyn SessionConnector>) -> Self {
        Self {
            connector,
            session: OnceCell::new(),
        }
    }

    /// Returns the live session, establishing it if needed.
    pub async fn get(&self) -> Result<Arc<dyn MessageReader>> {
        let session = self
            .session
            .get_or_try_init(|| async {
                log::info!("Establishing messaging session");
                let reader = self.connector.connect().await;
                match &reader {
                    Ok(_) => log::info!("Messaging session established"),
                    Err(e) => log::warn!("Messaging session failed: {e}"),
                }
                reader
            })
            .await?;
        Ok(Arc::clone(session))
    }

    /// Whether a session has been established.
    pub fn is_ready(&self) -> bool {
        self.session.initialized()
    }
}
