//! Order notifications to the operators' Telegram chat.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::{TelegramSettings, TELEGRAM_API_BASE};
use crate::domain::ReceiptFile;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One button of an inline keyboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InlineButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
            url: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
            url: Some(url.into()),
        }
    }
}

/// Rows of inline buttons attached to a message.
pub type InlineKeyboard = Vec<Vec<InlineButton>>;

/// Chat channel where operators receive new orders.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Destination chat, when one is configured
    fn chat_id(&self) -> Option<String>;

    /// Post a Markdown message; returns the chat message id when known
    async fn send_message(&self, text: &str, keyboard: InlineKeyboard) -> AppResult<Option<i64>>;

    /// Upload a file with a Markdown caption
    async fn send_document(&self, file: &ReceiptFile, caption: &str) -> AppResult<()>;
}

#[derive(Debug, Deserialize)]
struct BotResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Telegram Bot API client.
pub struct TelegramClient {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(client: reqwest::Client, settings: &TelegramSettings) -> Self {
        Self {
            client,
            bot_token: settings.bot_token.clone(),
            chat_id: settings.chat_id.clone(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{TELEGRAM_API_BASE}/bot{}/{method}", self.bot_token)
    }
}

fn check<T>(response: BotResponse<T>, method: &str) -> AppResult<Option<T>> {
    if response.ok {
        Ok(response.result)
    } else {
        Err(AppError::upstream(format!(
            "Telegram {method} failed: {}",
            response.description.unwrap_or_default()
        )))
    }
}

#[async_trait]
impl ChatNotifier for TelegramClient {
    fn chat_id(&self) -> Option<String> {
        Some(self.chat_id.clone())
    }

    async fn send_message(&self, text: &str, keyboard: InlineKeyboard) -> AppResult<Option<i64>> {
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
            "reply_markup": { "inline_keyboard": keyboard },
        });

        let response: BotResponse<SentMessage> = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        let sent = check(response, "sendMessage")?;
        tracing::info!(message_id = ?sent.as_ref().map(|m| m.message_id), "Telegram message sent");
        Ok(sent.map(|m| m.message_id))
    }

    async fn send_document(&self, file: &ReceiptFile, caption: &str) -> AppResult<()> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .text("parse_mode", "Markdown")
            .part("document", part);

        let response: BotResponse<serde_json::Value> = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        check(response, "sendDocument")?;
        tracing::info!(file = %file.file_name, size = file.bytes.len(), "Receipt sent to Telegram");
        Ok(())
    }
}

/// Stand-in used when no bot is configured: notifications go to the log.
pub struct LogNotifier;

#[async_trait]
impl ChatNotifier for LogNotifier {
    fn chat_id(&self) -> Option<String> {
        None
    }

    async fn send_message(&self, text: &str, keyboard: InlineKeyboard) -> AppResult<Option<i64>> {
        let buttons: Vec<&str> = keyboard.iter().flatten().map(|b| b.text.as_str()).collect();
        tracing::info!(
            "=== CHAT MESSAGE (not sent) ===\n{}\nButtons: {:?}\n===============================",
            text,
            buttons
        );
        Ok(None)
    }

    async fn send_document(&self, file: &ReceiptFile, caption: &str) -> AppResult<()> {
        tracing::info!(
            file = %file.file_name,
            size = file.bytes.len(),
            caption = %caption,
            "Receipt not sent, Telegram is not configured"
        );
        Ok(())
    }
}
