//! Notification channel abstraction for delivering verification codes.

use anyhow::Result;
use async_trait::async_trait;

/// Delivers a verification code to a phone number or email address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Send `code` to `destination`. Errors cover network failures, rejected
    /// credentials and undeliverable destinations alike.
    async fn send_code(&self, destination: &str, code: u32) -> Result<()>;
}
