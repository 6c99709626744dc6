use anyhow::Context;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::mailer::{render_html_body, Mailer, SUMMARY_SUBJECT};

/// Port on which the relay expects implicit TLS instead of STARTTLS
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build the SMTP transport once at startup.
    /// The SMTP user doubles as the sender address.
    pub fn init(config: SmtpConfig) -> anyhow::Result<Self> {
        let from = config
            .username
            .parse::<Mailbox>()
            .inspect_err(|e| tracing::error!(error = %e, "Invalid sender address"))
            .context("EMAIL_USER is not a valid email address")?;

        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .inspect_err(|e| tracing::error!(error = %e, host = %config.host, "Failed to configure SMTP relay"))
        .context("Failed to configure SMTP relay")?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        tracing::info!(host = %config.host, port = config.port, "SMTP transport ready");

        Ok(SmtpMailer { transport, from })
    }
}

impl Mailer for SmtpMailer {
    #[tracing::instrument(skip(self, text))]
    async fn send_summary(&self, text: &str, recipient: &str) -> anyhow::Result<()> {
        let to = recipient
            .parse::<Mailbox>()
            .inspect_err(|e| tracing::error!(error = %e, "Invalid recipient address"))
            .with_context(|| format!("Invalid recipient address: {recipient}"))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(SUMMARY_SUBJECT)
            .multipart(MultiPart::alternative_plain_html(
                text.to_string(),
                render_html_body(text),
            ))
            .context("Failed to build summary email")?;

        self.transport
            .send(email)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to send summary email"))
            .context("Failed to send summary email")?;

        tracing::info!("Summary email sent");

        Ok(())
    }
}
