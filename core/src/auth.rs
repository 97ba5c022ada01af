//! Request signing for the comics backend.
//!
//! Every call carries `ts`, `apikey` and `hash`, where `hash` is the hex MD5
//! of `ts + private_key + public_key`.

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};

/// Key pair issued by the comics backend.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub public_key: String,
    pub private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }
}

// The private key never reaches logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Lowercase hex MD5 of `ts + private_key + public_key`.
pub fn sign(ts: &str, credentials: &Credentials) -> String {
    let mut hasher = Md5::new();
    hasher.update(ts.as_bytes());
    hasher.update(credentials.private_key.as_bytes());
    hasher.update(credentials.public_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Source of the request timestamp.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
