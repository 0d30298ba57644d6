use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_email_from() -> String {
    "Shop Admin <noreply@example.com>".to_string()
}

fn default_dispatch_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Redis URL for a shared code store. Codes are kept in process memory when unset.
    #[serde(default)]
    pub redis_url: Option<String>,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    /// Sender number registered with Twilio (E.164).
    pub twilio_from_number: String,
    /// SMTP URL for development email (e.g., smtp://localhost:1025)
    #[serde(default)]
    pub smtp_url: Option<String>,
    /// Resend API key for production email
    #[serde(default)]
    pub resend_api_key: Option<String>,
    #[serde(default = "default_email_from")]
    pub email_from: String,
    /// Echo issued codes in send-code responses. Manual testing only.
    #[serde(default)]
    pub expose_debug_code: bool,
    /// Upper bound for a single SMS/email dispatch attempt.
    #[serde(default = "default_dispatch_timeout_secs")]
    pub dispatch_timeout_secs: u64,
    /// Origin of the admin frontend. Any origin is allowed when unset.
    #[serde(default)]
    pub cors_allowed_origin: Option<String>,
    /// Set to "production" for JSON logging, anything else for human-readable.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }

    pub fn store_backend(&self) -> &'static str {
        match self.redis_url.as_deref() {
            Some(url) if !url.is_empty() => "redis",
            _ => "memory",
        }
    }

    pub fn email_backend(&self) -> &'static str {
        if self.resend_api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            "resend"
        } else {
            "smtp"
        }
    }
}
