//! Telegram channel adapter.

pub mod schemas;
mod server;

pub use server::{
    DEFAULT_FETCH_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_FETCH_LIMIT, SEARCH_FETCH_BATCH, TelegramMcp,
};
