//! Telegram transport
//!
//! A minimal Bot API client covering the slice this bot uses, plus the
//! wire types for inbound updates and outbound reply markup.

mod client;
mod types;

pub use client::{Client, TelegramError};
pub use types::*;
