//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SMTP_PORT,
    DEFAULT_SUPPORT_WHATSAPP,
};

/// Telegram bot credentials for order notifications
#[derive(Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

/// SMTP relay settings for customer emails
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub sender: String,
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub google_client_id: String,
    pub telegram: Option<TelegramSettings>,
    pub smtp: Option<SmtpSettings>,
    pub static_dir: Option<String>,
    pub support_whatsapp: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("google_client_id", &self.google_client_id)
            .field("telegram", &self.telegram.as_ref().map(|_| "[REDACTED]"))
            .field("smtp", &self.smtp.as_ref().map(|s| &s.host))
            .field("static_dir", &self.static_dir)
            .field("support_whatsapp", &self.support_whatsapp)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Telegram and SMTP are optional as a whole: a partially configured
    /// integration is treated as absent and reported with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let google_client_id = non_empty("GOOGLE_CLIENT_ID").unwrap_or_else(|| {
            tracing::warn!("GOOGLE_CLIENT_ID not set, Google login will reject every token");
            String::new()
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            google_client_id,
            telegram: telegram_from_env(),
            smtp: smtp_from_env(),
            static_dir: non_empty("STATIC_DIR"),
            support_whatsapp: non_empty("SUPPORT_WHATSAPP")
                .unwrap_or_else(|| DEFAULT_SUPPORT_WHATSAPP.to_string()),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn telegram_from_env() -> Option<TelegramSettings> {
    match (non_empty("TELEGRAM_BOT_TOKEN"), non_empty("TELEGRAM_CHAT_ID")) {
        (Some(bot_token), Some(chat_id)) => Some(TelegramSettings { bot_token, chat_id }),
        (None, None) => None,
        _ => {
            tracing::warn!("Telegram is partially configured, notifications will only be logged");
            None
        }
    }
}

fn smtp_from_env() -> Option<SmtpSettings> {
    let host = non_empty("SMTP_HOST");
    let user = non_empty("SMTP_USER");
    let pass = non_empty("SMTP_PASS");

    match (host, user, pass) {
        (Some(host), Some(user), Some(pass)) => {
            let port = match env::var("SMTP_PORT") {
                Ok(raw) => match raw.parse() {
                    Ok(port) => port,
                    Err(_) => {
                        tracing::warn!(value = %raw, "SMTP_PORT is not a valid port, emails will only be logged");
                        return None;
                    }
                },
                Err(_) => DEFAULT_SMTP_PORT,
            };
            let sender = non_empty("SENDER_EMAIL").unwrap_or_else(|| user.clone());
            Some(SmtpSettings {
                host,
                port,
                user,
                pass,
                sender,
            })
        }
        (None, None, None) => None,
        _ => {
            tracing::warn!("SMTP is partially configured, emails will only be logged");
            None
        }
    }
}
