//! Session configuration

/// Static configuration a session is constructed with
///
/// The secret token is the shared bearer secret the payment provider echoes
/// back on a successful checkout. It is injected here rather than compiled
/// into the library; see `UnlockGate` for why this scheme is weak.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// External checkout page the pricing view redirects to
    pub checkout_url: String,
    /// Shared secret expected in the payment-return `token` parameter
    pub secret_token: String,
}

impl SessionConfig {
    /// Build a config
    #[inline]
    #[must_use]
    pub fn new(checkout_url: impl Into<String>, secret_token: impl Into<String>) -> Self {
        Self {
            checkout_url: checkout_url.into(),
            secret_token: secret_token.into(),
        }
    }
}
