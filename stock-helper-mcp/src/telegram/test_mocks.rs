use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use stock_helper_provider::{MessageReader, SessionConnector};
use tokio::sync::Mutex;

pub fn channel_not_found(channel: &str) -> ProviderError {
    ProviderError::ChannelNotFound {
        provider: "telegram".to_string(),
        channel: channel.to_string(),
    }
}

pub fn session_error(detail: &str) -> ProviderError {
    ProviderError::Session {
        provider: "telegram".to_string(),
        detail: detail.to_string(),
    }
}

/// Newest-first fixture history of `count` messages. Every third message is media only.
pub fn history(count: usize) -> Vec<ChannelMessage> {
    (0..count)
        .map(|i| {
            let id = 1_000 - i as i32;
            let text = if i % 3 == 2 {
                String::new()
            } else {
                format!("post {id} about dividends")
            };
            ChannelMessage::new(id, 1_700_000_000 - i as i64 * 60, &text, Some(77))
        })
        .collect()
}

/// In-memory channel reader with a fixed history per channel.
///
/// Every requested limit is recorded so tests can check what reached the upstream.
#[derive(Default)]
pub struct MockReader {
    channels: Vec<(String, Vec<ChannelMessage>)>,
    fetch_limits: Mutex<Vec<usize>>,
    search_limits: Mutex<Vec<usize>>,
}

impl MockReader {
    pub fn with_channel(mut self, name: &str, messages: Vec<ChannelMessage>) -> Self {
        self.channels.push((name.to_string(), messages));
        self
    }

    pub async fn fetch_limits(&self) -> Vec<usize> {
        self.fetch_limits.lock().await.clone()
    }

    pub async fn search_limits(&self) -> Vec<usize> {
        self.search_limits.lock().await.clone()
    }

    fn lookup(&self, channel: &str) -> Result<&[ChannelMessage], ProviderError> {
        let name = channel.trim_start_matches('@');
        self.channels
            .iter()
            .find(|(known, _)| known == name)
            .map(|(_, messages)| messages.as_slice())
            .ok_or_else(|| channel_not_found(channel))
    }
}

#[async_trait]
impl MessageReader for MockReader {
    async fn get_messages(&self, channel: &str, limit: usize) -> Result<Vec<ChannelMessage>, ProviderError> {
        self.fetch_limits.lock().await.push(limit);
        let messages = self.lookup(channel)?;
        Ok(messages.iter().take(limit).cloned().collect())
    }

    async fn search_messages(
        &self,
        channel: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelMessage>, ProviderError> {
        self.search_limits.lock().await.push(limit);
        let needle = query.to_lowercase();
        let messages = self.lookup(channel)?;
        Ok(messages
            .iter()
            .filter(|m| m.text.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Connector handing out a shared [`MockReader`], counting connection attempts.
///
/// The first `failures` attempts fail with a session error.
pub struct MockConnector {
    reader: Arc<MockReader>,
    attempts: AtomicUsize,
    failures: usize,
    delay: Duration,
}

impl MockConnector {
    pub fn new(reader: Arc<MockReader>) -> Self {
        Self {
            reader,
            attempts: AtomicUsize::new(0),
            failures: 0,
            delay: Duration::ZERO,
        }
    }

    pub fn failing_first(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionConnector for MockConnector {
    async fn connect(&self) -> Result<Arc<dyn MessageReader>, ProviderError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if attempt < self.failures {
            return Err(session_error("session string rejected"));
        }
        Ok(self.reader.clone() as Arc<dyn MessageReader>)
    }
}

/// Reader with a `stocks` channel of 150 messages.
pub fn stocks_reader() -> Arc<MockReader> {
    Arc::new(MockReader::default().with_channel("stocks", history(150)))
}

pub fn build_server(connector: Arc<MockConnector>) -> TelegramMcp {
    TelegramMcp::new(Arc::new(SessionManager::new(connector)))
}
