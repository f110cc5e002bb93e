// Copyright 2025 LocaLLM Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{Error, Result};

/// Application-wide configuration constants
pub struct AppConfig;

impl AppConfig {
    // Server
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_LOG_FILTER: &'static str = "localllm=debug,tower_http=debug";

    // Mail relay
    pub const DEFAULT_SMTP_HOST: &'static str = "smtp.office365.com";
    pub const DEFAULT_SMTP_PORT: u16 = 587;
    pub const DEFAULT_NOTIFY_ADDRESS: &'static str = "yassine.elgares@medtech.tn";
    pub const SENDER_DISPLAY_NAME: &'static str = "LocaLLM Platform";

    // Generative model endpoint
    pub const DEFAULT_GENAI_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_GENAI_MODEL: &'static str = "gemini-2.0-flash";
    pub const GENAI_TEMPERATURE: f64 = 0.7;
    pub const GENAI_TOP_K: u32 = 40;
    pub const GENAI_TOP_P: f64 = 0.95;
    pub const GENAI_MAX_OUTPUT_TOKENS: u32 = 4096;

    // Terminal
    pub const EVENT_POLL_TIMEOUT_MS: u64 = 100;
}

/// How the SMTP connection is secured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS.
    StartTls,
    /// TLS from the first byte (usually port 465).
    Implicit,
}

/// Outbound mail settings read from `SMTP_*` variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub security: SmtpSecurity,
    pub notify_address: String,
}

impl MailSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("SMTP_PORT {raw:?}: {e}")))?,
            None => AppConfig::DEFAULT_SMTP_PORT,
        };

        let security = match non_empty("SMTP_SECURE").as_deref() {
            Some("true") => SmtpSecurity::Implicit,
            _ => SmtpSecurity::StartTls,
        };

        Ok(Self {
            host: non_empty("SMTP_HOST").unwrap_or_else(|| AppConfig::DEFAULT_SMTP_HOST.into()),
            port,
            user: non_empty("SMTP_USER"),
            password: non_empty("SMTP_PASS"),
            security,
            notify_address: non_empty("MAIL_TO")
                .unwrap_or_else(|| AppConfig::DEFAULT_NOTIFY_ADDRESS.into()),
        })
    }

    /// Sending is attempted only when a password is configured.
    pub fn can_send(&self) -> bool {
        self.password.is_some()
    }

    /// Envelope sender: the SMTP user, falling back to the notify address.
    pub fn sender_address(&self) -> &str {
        self.user.as_deref().unwrap_or(&self.notify_address)
    }
}

/// Settings for the hosted generative-language endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl ChatSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            // An empty key still reaches the endpoint, which answers with an error object
            api_key: non_empty("GOOGLE_API_KEY").unwrap_or_default(),
            base_url: non_empty("GENAI_BASE_URL")
                .unwrap_or_else(|| AppConfig::DEFAULT_GENAI_BASE_URL.into()),
            model: non_empty("GENAI_MODEL").unwrap_or_else(|| AppConfig::DEFAULT_GENAI_MODEL.into()),
        }
    }
}
