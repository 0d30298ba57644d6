use std::{
    sync::{Arc, LazyLock},
    time::Duration,
};

use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;

use super::{Channel, OtpError};
use crate::{
    services::NotificationChannel,
    stores::{OtpRecord, OtpStore},
};

/// Delivery attempts per issuance: the first try plus one retry.
const DISPATCH_ATTEMPTS: u32 = 2;

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("phone pattern is valid"));

/// E.164-style number: `+`, a non-zero digit, then 1 to 14 more digits.
pub fn is_valid_phone_number(identifier: &str) -> bool {
    PHONE_NUMBER.is_match(identifier)
}

/// Uniform draw from 100000..=999999.
pub fn generate_code() -> u32 {
    rand::rng().random_range(100_000..=999_999)
}

/// A code that was stored and delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub identifier: String,
    pub code: u32,
}

#[derive(Clone)]
pub struct OtpIssuer {
    channel: Channel,
    store: Arc<dyn OtpStore>,
    notifier: Arc<dyn NotificationChannel>,
    dispatch_timeout: Duration,
}

impl OtpIssuer {
    pub fn new(
        channel: Channel,
        store: Arc<dyn OtpStore>,
        notifier: Arc<dyn NotificationChannel>,
        dispatch_timeout: Duration,
    ) -> Self {
        Self {
            channel,
            store,
            notifier,
            dispatch_timeout,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Issue a fresh code for `identifier`, replacing any pending one, and deliver it.
    pub async fn issue(
        &self,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedCode, OtpError> {
        if self.channel == Channel::Phone && !is_valid_phone_number(identifier) {
            return Err(OtpError::InvalidFormat);
        }

        let record = OtpRecord {
            code: generate_code(),
            issued_at: now,
        };

        self.store.put(identifier, &record).await?;

        if let Err(err) = self.dispatch(identifier, record.code).await {
            tracing::warn!(
                channel = %self.channel,
                identifier,
                "code dispatch failed: {:#}",
                err
            );
            self.roll_back(identifier, &record).await;
            return Err(OtpError::DispatchFailed(err));
        }

        Ok(IssuedCode {
            identifier: identifier.to_string(),
            code: record.code,
        })
    }

    async fn dispatch(&self, identifier: &str, code: u32) -> anyhow::Result<()> {
        let mut attempt = 1;
        loop {
            let err = match tokio::time::timeout(
                self.dispatch_timeout,
                self.notifier.send_code(identifier, code),
            )
            .await
            {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(err)) => err,
                Err(_) => anyhow::anyhow!("timed out after {:?}", self.dispatch_timeout),
            };

            if attempt >= DISPATCH_ATTEMPTS {
                return Err(err);
            }

            tracing::warn!(
                channel = %self.channel,
                identifier,
                attempt,
                "retrying code dispatch: {:#}",
                err
            );
            attempt += 1;
        }
    }

    /// Remove the record written by a failed issuance, unless a newer
    /// issuance has already replaced it.
    async fn roll_back(&self, identifier: &str, record: &OtpRecord) {
        let result = match self.store.get(identifier).await {
            Ok(Some(current)) if current == *record => self.store.remove(identifier).await,
            Ok(_) => Ok(()),
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            tracing::error!(
                channel = %self.channel,
                identifier,
                "failed to roll back undelivered code: {:#}",
                err
            );
        }
    }
}
