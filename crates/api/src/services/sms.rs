//! SMS delivery of verification codes via Twilio.

use anyhow::Result;
use async_trait::async_trait;

use super::{notify::NotificationChannel, twilio};

/// Text of the SMS carrying a verification code.
pub fn sms_body(code: u32) -> String {
    format!(
        "Your verification code is: {}. Valid for 5 minutes. Do not share this OTP with anyone.",
        code
    )
}

/// Twilio implementation of NotificationChannel.
pub struct TwilioSmsChannel {
    client: twilio::Client,
    from_number: String,
}

impl TwilioSmsChannel {
    pub fn new(client: twilio::Client, from_number: impl Into<String>) -> Self {
        Self {
            client,
            from_number: from_number.into(),
        }
    }
}

#[async_trait]
impl NotificationChannel for TwilioSmsChannel {
    async fn send_code(&self, destination: &str, code: u32) -> Result<()> {
        let message = self
            .client
            .send_message(destination, &self.from_number, &sms_body(code))
            .await
            .map_err(|e| anyhow::anyhow!("Twilio send failed: {}", e))?;

        tracing::debug!(sid = %message.sid, status = %message.status, "sms queued");

        Ok(())
    }
}
