//! Shared test utilities for API handler tests.
//!
//! Provides a flexible `TestStateBuilder` for constructing `AppState`
//! instances with only the mocks needed for each test.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::TestStateBuilder;
//!
//! let mut sms = MockNotificationChannel::new();
//! sms.expect_send_code().returning(|_, _| Ok(()));
//!
//! let state = TestStateBuilder::new()
//!     .with_sms_channel(sms)
//!     .build();
//! ```

use std::{sync::Arc, time::Duration};

use crate::config::Config;
use crate::otp::{Channel, OtpFlow};
use crate::services::{MockNotificationChannel, NotificationChannel};
use crate::state::AppState;
use crate::stores::{MemoryOtpStore, OtpStore};

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 5000,
        redis_url: None,
        twilio_account_sid: "AC_test".to_string(),
        twilio_auth_token: "test".to_string(),
        twilio_from_number: "+15005550006".to_string(),
        smtp_url: None,
        resend_api_key: None,
        email_from: "Shop Admin <noreply@example.com>".to_string(),
        expose_debug_code: false,
        dispatch_timeout_secs: 10,
        cors_allowed_origin: None,
        env: "test".to_string(),
        sentry_dsn: None,
    }
}

/// Builder for constructing test `AppState` with custom mocks.
///
/// Stores default to fresh in-memory stores; channels default to mocks
/// with no expectations, so any unexpected delivery fails the test.
pub struct TestStateBuilder {
    config: Option<Config>,
    phone_store: Option<Arc<dyn OtpStore>>,
    email_store: Option<Arc<dyn OtpStore>>,
    sms_channel: Option<MockNotificationChannel>,
    email_channel: Option<MockNotificationChannel>,
}

impl TestStateBuilder {
    /// Creates a new builder with no mocks configured.
    pub fn new() -> Self {
        Self {
            config: None,
            phone_store: None,
            email_store: None,
            sms_channel: None,
            email_channel: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_phone_store(mut self, store: Arc<dyn OtpStore>) -> Self {
        self.phone_store = Some(store);
        self
    }

    pub fn with_email_store(mut self, store: Arc<dyn OtpStore>) -> Self {
        self.email_store = Some(store);
        self
    }

    pub fn with_sms_channel(mut self, channel: MockNotificationChannel) -> Self {
        self.sms_channel = Some(channel);
        self
    }

    pub fn with_email_channel(mut self, channel: MockNotificationChannel) -> Self {
        self.email_channel = Some(channel);
        self
    }

    /// Builds the `AppState` using configured mocks or defaults.
    pub fn build(self) -> AppState {
        let config = self.config.unwrap_or_else(test_config);
        let timeout = Duration::from_secs(config.dispatch_timeout_secs);

        let sms = Arc::new(self.sms_channel.unwrap_or_else(MockNotificationChannel::new))
            as Arc<dyn NotificationChannel>;
        let email = Arc::new(self.email_channel.unwrap_or_else(MockNotificationChannel::new))
            as Arc<dyn NotificationChannel>;

        let phone_store = self
            .phone_store
            .unwrap_or_else(|| Arc::new(MemoryOtpStore::new()) as Arc<dyn OtpStore>);
        let email_store = self
            .email_store
            .unwrap_or_else(|| Arc::new(MemoryOtpStore::new()) as Arc<dyn OtpStore>);

        AppState {
            config,
            phone: OtpFlow::new(Channel::Phone, phone_store, sms, timeout),
            email: OtpFlow::new(Channel::Email, email_store, email, timeout),
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
