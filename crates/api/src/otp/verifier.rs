use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::OtpError;
use crate::stores::OtpStore;

#[derive(Clone)]
pub struct OtpVerifier {
    store: Arc<dyn OtpStore>,
}

impl OtpVerifier {
    pub fn new(store: Arc<dyn OtpStore>) -> Self {
        Self { store }
    }

    /// Check `submitted` against the pending code for `identifier`.
    ///
    /// The record is consumed only on success. A mismatch or an expired code
    /// leaves it in place, so a correct code can still be submitted within
    /// the window.
    pub async fn verify(
        &self,
        identifier: &str,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<(), OtpError> {
        let Some(record) = self.store.get(identifier).await? else {
            return Err(OtpError::NoPendingCode);
        };

        if record.code.to_string() != submitted || record.is_expired(now) {
            return Err(OtpError::InvalidOrExpired);
        }

        self.store.remove(identifier).await?;

        Ok(())
    }
}
