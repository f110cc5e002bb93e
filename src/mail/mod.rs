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

//! Notification emails for the rental and contact forms.

pub mod message;
pub mod smtp;

use async_trait::async_trait;
use std::sync::Arc;

use crate::common::config::MailSettings;
use crate::error::Result;

pub use message::{contact_notification, rental_notification, OutgoingMail};
pub use smtp::SmtpMailer;

/// Transport interface for delivering composed notifications.
///
/// Each call is independent: no retry, no queuing, no delivery receipt.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;

    /// Transport name for logging
    fn name(&self) -> &str;
}

/// Build the SMTP transport, or `None` when no password is configured.
pub fn transport_from_settings(settings: &MailSettings) -> Result<Option<Arc<dyn MailTransport>>> {
    if !settings.can_send() {
        return Ok(None);
    }
    let mailer: Arc<dyn MailTransport> = Arc::new(SmtpMailer::new(settings)?);
    Ok(Some(mailer))
}
