//! Pending code stores.
//!
//! Each verification channel (phone, email) owns its own store, so the same
//! person can verify both contacts without the flows interfering.
//!
//! ## Backends
//!
//! - **memory** - Process-local map (default). Lost on restart.
//! - **redis** - Shared across instances, TTL equal to the code validity window.
//!
//! ## Redis Key Patterns
//!
//! ```text
//! otp:phone:{phone_number}   → OtpRecord JSON (auto-expires)
//! otp:email:{email}          → OtpRecord JSON (auto-expires)
//! ```

mod memory;
mod otp;

pub use memory::MemoryOtpStore;
pub use otp::{OtpRecord, OtpStore, RedisOtpStore};

#[cfg(test)]
pub use otp::MockOtpStore;
