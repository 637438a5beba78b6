//! Credential checks for privileged operations.
//!
//! Reporting a cafe closed requires the caller to present the shared API key.
//! Routes depend on the [`CredentialCheck`] trait, not on how keys are stored.

use secrecy::{ExposeSecret, SecretString};

/// Decides whether a presented credential authorizes a privileged operation.
pub trait CredentialCheck: Send + Sync {
    /// Returns `true` if `presented` grants access. `None` means no credential was sent.
    fn verify(&self, presented: Option<&str>) -> bool;
}

/// A single static shared secret, compared in constant time.
pub struct SharedSecret {
    secret: SecretString,
}

impl SharedSecret {
    /// Create a check against the given secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl CredentialCheck for SharedSecret {
    fn verify(&self, presented: Option<&str>) -> bool {
        presented.is_some_and(|key| constant_time_compare(self.secret.expose_secret(), key))
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
