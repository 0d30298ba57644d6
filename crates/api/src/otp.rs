//! One-time-passcode verification of phone numbers and email addresses.
//!
//! Flow:
//! 1. Client requests a code for an identifier (phone number or email)
//! 2. [`OtpIssuer`] generates a 6-digit code, records it in the channel's
//!    [`OtpStore`] and delivers it through a [`NotificationChannel`]
//! 3. Client submits the identifier and the code
//! 4. [`OtpVerifier`] checks the code and the 5 minute window; on success the
//!    record is deleted so the code cannot be replayed
//!
//! Notes:
//! - One pending code per identifier per channel; a new request overwrites it
//! - A failed attempt leaves the record in place so the user can retry
//! - No attempt limit or lockout on verification
//! - If delivery fails the record written for that request is rolled back
//!
//! [`OtpStore`]: crate::stores::OtpStore
//! [`NotificationChannel`]: crate::services::NotificationChannel

mod error;
mod issuer;
mod verifier;

pub use error::OtpError;
pub use issuer::OtpIssuer;
pub use verifier::OtpVerifier;

use std::{fmt, sync::Arc, time::Duration};

use crate::{services::NotificationChannel, stores::OtpStore};

/// Validity window of an issued code in milliseconds.
pub const OTP_TTL_MS: i64 = 5 * 60 * 1000;

/// Contact channel being verified. Each channel has its own store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Phone,
    Email,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Phone => f.write_str("phone"),
            Channel::Email => f.write_str("email"),
        }
    }
}

/// Issuer and verifier sharing one channel's store.
#[derive(Clone)]
pub struct OtpFlow {
    pub issuer: OtpIssuer,
    pub verifier: OtpVerifier,
    store: Arc<dyn OtpStore>,
}

impl OtpFlow {
    pub fn new(
        channel: Channel,
        store: Arc<dyn OtpStore>,
        notifier: Arc<dyn NotificationChannel>,
        dispatch_timeout: Duration,
    ) -> Self {
        Self {
            issuer: OtpIssuer::new(channel, store.clone(), notifier, dispatch_timeout),
            verifier: OtpVerifier::new(store.clone()),
            store,
        }
    }

    pub fn channel(&self) -> Channel {
        self.issuer.channel()
    }

    /// Whether the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }
}
