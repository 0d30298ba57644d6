//! Email delivery of verification codes.
//!
//! Uses Resend in production, SMTP (lettre) in development.
//! This allows local development without a Resend account.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
};
use resend_rs::types::CreateEmailBaseOptions;

use super::notify::NotificationChannel;

const SUBJECT: &str = "Email Verification OTP";

/// HTML body of the email carrying a verification code.
pub fn email_html(code: u32) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #1a237e;">Email Verification</h2>
  <p>Your verification code is:</p>
  <h1 style="color: #2e7d32; font-size: 36px;">{}</h1>
  <p>This code will expire in 5 minutes.</p>
  <p style="color: #d32f2f;">Do not share this code with anyone.</p>
</div>"#,
        code
    )
}

/// Email implementation of NotificationChannel.
pub enum EmailChannel {
    /// SMTP-based sender using lettre (for development)
    Smtp(SmtpSender),
    /// Resend API sender (for production)
    Resend(ResendSender),
}

impl EmailChannel {
    /// Create a new email channel based on config.
    /// Uses Resend if api key is provided, otherwise falls back to SMTP.
    ///
    /// `smtp_timeout` bounds each SMTP socket operation.
    pub fn new(
        resend_api_key: Option<String>,
        smtp_url: Option<String>,
        from: String,
        smtp_timeout: Duration,
    ) -> Result<Self> {
        if let Some(api_key) = resend_api_key.filter(|k| !k.is_empty()) {
            Ok(Self::Resend(ResendSender::new(api_key, from)))
        } else if let Some(url) = smtp_url.filter(|u| !u.is_empty()) {
            Ok(Self::Smtp(SmtpSender::new(url, &from, smtp_timeout)?))
        } else {
            anyhow::bail!("Either RESEND_API_KEY or SMTP_URL must be configured")
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    async fn send_code(&self, destination: &str, code: u32) -> Result<()> {
        match self {
            Self::Resend(sender) => sender.send(destination, &email_html(code)).await,
            Self::Smtp(sender) => sender.send(destination, &email_html(code)).await,
        }
    }
}

/// SMTP sender using lettre.
pub struct SmtpSender {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpSender {
    pub fn new(smtp_url: String, from: &str, timeout: Duration) -> Result<Self> {
        let transport = SmtpTransport::from_url(&smtp_url)?
            .timeout(Some(timeout))
            .build();

        Ok(Self {
            transport,
            from: from.parse()?,
        })
    }

    pub async fn send(&self, to: &str, html: &str) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, to.parse()?))
            .subject(SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())?;

        // lettre's SmtpTransport blocks; keep it off the async workers.
        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&email)).await??;

        Ok(())
    }
}

/// Resend API sender.
pub struct ResendSender {
    client: resend_rs::Resend,
    from: String,
}

impl ResendSender {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: resend_rs::Resend::new(&api_key),
            from,
        }
    }

    pub async fn send(&self, to: &str, html: &str) -> Result<()> {
        let email = CreateEmailBaseOptions::new(&self.from, [to], SUBJECT).with_html(html);

        self.client.emails.send(email).await?;

        Ok(())
    }
}
