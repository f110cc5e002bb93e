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

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::common::config::{AppConfig, MailSettings, SmtpSecurity};
use crate::error::{Error, Result};
use crate::mail::message::OutgoingMail;
use crate::mail::MailTransport;

/// Delivers notifications through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

fn parse_address(raw: &str) -> Result<Address> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| Error::Mail(format!("invalid address {raw:?}: {e}")))
}

impl SmtpMailer {
    pub fn new(settings: &MailSettings) -> Result<Self> {
        // Relays used by the demo often present self-signed certificates
        let tls_parameters = TlsParameters::builder(settings.host.clone())
            .dangerous_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::Mail(format!("TLS setup failed: {e}")))?;

        let tls = match settings.security {
            SmtpSecurity::Implicit => Tls::Wrapper(tls_parameters),
            SmtpSecurity::StartTls => Tls::Opportunistic(tls_parameters),
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls);

        if let (Some(user), Some(password)) = (&settings.user, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: Mailbox::new(
                Some(AppConfig::SENDER_DISPLAY_NAME.to_string()),
                parse_address(settings.sender_address())?,
            ),
            to: Mailbox::new(None, parse_address(&settings.notify_address)?),
        })
    }

    fn compose(&self, mail: &OutgoingMail) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(mail.subject.clone());

        // A malformed visitor address only loses the Reply-To header
        if let Some(reply_to) = mail.reply_to.as_deref() {
            match parse_address(reply_to) {
                Ok(address) => builder = builder.reply_to(Mailbox::new(None, address)),
                Err(e) => tracing::debug!("Skipping Reply-To: {e}"),
            }
        }

        let message = match &mail.text {
            Some(text) => builder.multipart(MultiPart::alternative_plain_html(
                text.clone(),
                mail.html.clone(),
            )),
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(mail.html.clone()),
        };

        message.map_err(|e| Error::Mail(format!("failed to build message: {e}")))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let message = self.compose(mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| Error::Mail(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MailSettings {
        MailSettings {
            host: "localhost".to_string(),
            port: 2525,
            user: Some("relay@example.com".to_string()),
            password: Some("secret".to_string()),
            security: SmtpSecurity::StartTls,
            notify_address: "ops@example.com".to_string(),
        }
    }

    #[test]
    fn test_compose_multipart_message() {
        let mailer = SmtpMailer::new(&settings()).unwrap();
        let message = mailer
            .compose(&OutgoingMail {
                subject: "Hello".to_string(),
                text: Some("plain".to_string()),
                html: "<p>html</p>".to_string(),
                reply_to: Some("not an address".to_string()),
            })
            .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Hello"));
        assert!(raw.contains("To: ops@example.com"));
        assert!(raw.contains("relay@example.com"));
        assert!(!raw.contains("Reply-To"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn test_rejects_invalid_notify_address() {
        let mut settings = settings();
        settings.notify_address = "nobody".to_string();
        assert!(matches!(SmtpMailer::new(&settings), Err(Error::Mail(_))));
    }
}
