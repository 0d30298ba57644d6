//! In-process code storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;

use super::otp::{OtpRecord, OtpStore};

/// Process-local OtpStore. Codes are lost on restart and never evicted;
/// stale entries stay until overwritten by a new issuance.
#[derive(Default)]
pub struct MemoryOtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
        // Every critical section is a single map operation, so a poisoned map is still consistent.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn put(&self, identifier: &str, record: &OtpRecord) -> Result<()> {
        self.records().insert(identifier.to_string(), *record);
        Ok(())
    }

    async fn get(&self, identifier: &str) -> Result<Option<OtpRecord>> {
        Ok(self.records().get(identifier).copied())
    }

    async fn remove(&self, identifier: &str) -> Result<()> {
        self.records().remove(identifier);
        Ok(())
    }
}
