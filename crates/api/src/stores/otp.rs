//! Pending verification code storage.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::otp::{Channel, OTP_TTL_MS};

/// A code waiting to be verified, keyed by the identifier it was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    pub code: u32,
    pub issued_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Expired once more than the validity window has elapsed since issuance.
    /// Exactly at the boundary the code is still accepted.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        (now - self.issued_at).num_milliseconds() > OTP_TTL_MS
    }
}

/// Store for pending codes. One instance per channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Health check - verify the backend is reachable.
    async fn health_check(&self) -> Result<bool>;

    /// Insert or overwrite the pending code for an identifier.
    async fn put(&self, identifier: &str, record: &OtpRecord) -> Result<()>;

    /// Get the pending code for an identifier.
    async fn get(&self, identifier: &str) -> Result<Option<OtpRecord>>;

    /// Delete the pending code for an identifier (no-op if absent).
    async fn remove(&self, identifier: &str) -> Result<()>;
}

/// Redis implementation of OtpStore, for deployments with more than one instance.
#[derive(Clone)]
pub struct RedisOtpStore {
    client: redis::Client,
    channel: Channel,
}

impl RedisOtpStore {
    pub fn new(client: redis::Client, channel: Channel) -> Self {
        Self { client, channel }
    }

    fn otp_key(&self, identifier: &str) -> String {
        format!("otp:{}:{}", self.channel, identifier)
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(result == "PONG")
    }

    async fn put(&self, identifier: &str, record: &OtpRecord) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = self.otp_key(identifier);
        let ttl_secs = (OTP_TTL_MS / 1000) as u64;

        let _: () = conn
            .set_ex(&key, serde_json::to_string(record)?, ttl_secs)
            .await?;
        Ok(())
    }

    async fn get(&self, identifier: &str) -> Result<Option<OtpRecord>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = self.otp_key(identifier);

        let json: Option<String> = conn.get(&key).await?;

        match json {
            Some(j) => Ok(Some(serde_json::from_str(&j)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, identifier: &str) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = self.otp_key(identifier);

        let _: () = conn.del(&key).await?;
        Ok(())
    }
}
