use thiserror::Error;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("identifier is not a valid international phone number")]
    InvalidFormat,

    #[error("failed to dispatch verification code: {0}")]
    DispatchFailed(#[source] anyhow::Error),

    #[error("no pending verification code")]
    NoPendingCode,

    #[error("verification code is invalid or expired")]
    InvalidOrExpired,

    #[error("code store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl OtpError {
    /// Failures caused by the caller's input rather than by infrastructure.
    /// Infrastructure failures are logged where they become an internal error.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat | Self::NoPendingCode | Self::InvalidOrExpired
        )
    }
}
