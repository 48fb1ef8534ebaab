//! Channel reads over a connected grammers client.

use async_trait::async_trait;
use grammers_client::Client;
use grammers_client::types::{Message, PackedChat};

use crate::error::{ProviderError, Result};
use crate::traits::{MessageReader, ProviderErrorMapper};
use crate::types::ChannelMessage;

use super::PROVIDER_NAME;

pub(crate) struct GrammersReader {
    client: Client,
}

impl GrammersReader {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn not_found(channel: &str) -> ProviderError {
        ProviderError::ChannelNotFound {
            provider: PROVIDER_NAME.to_string(),
            channel: channel.to_string(),
        }
    }

    /// Resolve a username (`@` optional) or numeric chat id.
    async fn resolve(&self, channel: &str) -> Result<PackedChat> {
        let trimmed = channel.trim();

        if let Some(bare_id) = bare_chat_id(trimmed) {
            let mut dialogs = self.client.iter_dialogs();
            while let Some(dialog) = dialogs.next().await.map_err(|e| self.network_error(e))? {
                if dialog.chat().id() == bare_id {
                    return Ok(dialog.chat().pack());
                }
            }
            return Err(Self::not_found(channel));
        }

        let username = trimmed.trim_start_matches('@');
        if username.is_empty() {
            return Err(Self::not_found(channel));
        }

        match self.client.resolve_username(username).await {
            Ok(Some(chat)) => Ok(chat.pack()),
            Ok(None) => Err(Self::not_found(channel)),
            Err(e) if e.to_string().contains("USERNAME_") => Err(Self::not_found(channel)),
            Err(e) => Err(self.network_error(e)),
        }
    }
}

impl ProviderErrorMapper for GrammersReader {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

fn to_channel_message(message: &Message) -> ChannelMessage {
    ChannelMessage::new(
        message.id(),
        message.date().timestamp(),
        message.text(),
        message.sender().map(|sender| sender.id()),
    )
}

/// Bare chat id for a numeric channel reference.
///
/// Accepts the bare id, the `-100`-prefixed channel form and the negated
/// basic-group form. Returns `None` for anything that is not an integer.
pub(crate) fn bare_chat_id(channel: &str) -> Option<i64> {
    let id = channel.parse::<i64>().ok()?;
    if let Some(rest) = channel.strip_prefix("-100").filter(|r| !r.is_empty()) {
        return rest.parse().ok();
    }
    Some(id.checked_abs().unwrap_or(id))
}

#[async_trait]
impl MessageReader for GrammersReader {
    async fn get_messages(&self, channel: &str, limit: usize) -> Result<Vec<ChannelMessage>> {
        let chat = self.resolve(channel).await?;
        log::debug!("[{PROVIDER_NAME}] fetching {limit} messages from {channel}");

        let mut messages = self.client.iter_messages(chat).limit(limit);
        let mut out = Vec::with_capacity(limit);
        while let Some(message) = messages.next().await.map_err(|e| self.network_error(e))? {
            out.push(to_channel_message(&message));
        }
        Ok(out)
    }

    async fn search_messages(
        &self,
        channel: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelMessage>> {
        let chat = self.resolve(channel).await?;
        log::debug!("[{PROVIDER_NAME}] searching {channel} for {query:?} (batch {limit})");

        let mut messages = self.client.search_messages(chat).query(query).limit(limit);
        let mut out = Vec::with_capacity(limit);
        while let Some(message) = messages.next().await.map_err(|e| self.network_error(e))? {
            out.push(to_channel_message(&message));
        }
        Ok(out)
    }
}
