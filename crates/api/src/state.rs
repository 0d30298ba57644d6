use crate::{config::Config, otp::OtpFlow};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Phone number verification.
    pub phone: OtpFlow,
    /// Email address verification.
    pub email: OtpFlow,
}
