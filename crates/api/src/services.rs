//! External service abstractions.
//!
//! Code delivery is abstracted behind the [`NotificationChannel`] trait so the
//! OTP flows can be tested without a real SMS gateway or mail server.
//!
//! ## Services
//!
//! - **sms** - Verification codes by SMS via Twilio
//! - **email** - Verification codes by email via Resend (prod) or SMTP (dev)
//! - **twilio** - Low-level Twilio HTTP client (used by the SMS channel)

mod email;
mod notify;
mod sms;
pub mod twilio;

pub use email::EmailChannel;
pub use notify::NotificationChannel;
pub use sms::TwilioSmsChannel;

#[cfg(test)]
pub use notify::MockNotificationChannel;
