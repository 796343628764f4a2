//! Admin access gate
//!
//! The admin cookie holds the password itself; every request re-hashes it
//! with SHA-256 and compares against the configured digest. There is no
//! server-side session.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{trace, warn};

use crate::errors::Result;

/// Name of the cookie carrying the admin password.
pub const ADMIN_COOKIE_NAME: &str = "admin";

/// Base64 SHA-256 digest of `password`, the format of the `admin.key` setting.
pub fn digest_password(password: &str) -> String {
    STANDARD.encode(Sha256::digest(password.as_bytes()))
}

#[derive(Clone)]
pub struct AccessGate {
    digest: Vec<u8>,
}

impl AccessGate {
    /// Build the gate from the base64 digest in the config. An empty key
    /// yields a gate that refuses everyone.
    pub fn from_base64(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            warn!("Admin key is not configured, admin pages are locked");
            return Ok(Self { digest: Vec::new() });
        }

        let digest = STANDARD.decode(key)?;
        if digest.len() != 32 {
            warn!(
                "Admin key decodes to {} bytes, a SHA-256 digest has 32; no password will match",
                digest.len()
            );
        }
        Ok(Self { digest })
    }

    /// Gate that accepts exactly `password`.
    pub fn for_password(password: &str) -> Self {
        Self {
            digest: Sha256::digest(password.as_bytes()).to_vec(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.digest.is_empty()
    }

    /// True iff a cookie value is present and hashes to the configured digest.
    pub fn is_authorized(&self, cookie_value: Option<&str>) -> bool {
        let Some(value) = cookie_value else {
            trace!("No admin cookie");
            return false;
        };
        if !self.is_enabled() {
            return false;
        }

        let hashed = Sha256::digest(value.as_bytes());
        bool::from(hashed.as_slice().ct_eq(&self.digest))
    }
}
