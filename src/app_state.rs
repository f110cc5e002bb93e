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

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::CatalogStore;
use crate::chat::GenerativeClient;
use crate::common::config::{ChatSettings, MailSettings};
use crate::error::Result;
use crate::mail::{transport_from_settings, MailTransport};

/// Catalog handle shared by request handlers and the jitter ticker.
pub type SharedCatalog = Arc<RwLock<CatalogStore>>;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
    /// `None` when no SMTP password is configured.
    pub mailer: Option<Arc<dyn MailTransport>>,
    pub chat: GenerativeClient,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        catalog: CatalogStore,
        mailer: Option<Arc<dyn MailTransport>>,
        chat: GenerativeClient,
    ) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            mailer,
            chat,
        }
    }

    /// Build state from the process environment.
    pub fn from_env() -> Result<Self> {
        let mail = MailSettings::from_env()?;
        let mailer = transport_from_settings(&mail)?;
        if mailer.is_none() {
            tracing::info!("SMTP_PASS not set, notification emails are disabled");
        }
        Ok(Self::new(
            CatalogStore::new(),
            mailer,
            GenerativeClient::new(ChatSettings::from_env()),
        ))
    }
}
