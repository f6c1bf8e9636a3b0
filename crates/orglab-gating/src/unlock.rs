//! Payment-return unlock flow
//!
//! After external checkout the payment provider redirects back to the
//! application URL with `status` and `token` query parameters. They are
//! checked exactly once on load, consumed, and the URL is rewritten to
//! strip them.

use crate::policy;
use orglab_model::OrgNode;
use orglab_store::{slots, KeyValueStore};

/// Query marker the provider sends on a successful checkout
const SUCCESS_STATUS: &str = "success";

/// Parsed payment-return query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReturn {
    /// Checkout status marker
    pub status: String,
    /// Bearer token presented by the redirect
    pub token: String,
}

impl PaymentReturn {
    /// Extract `status`/`token` from a URL query string
    ///
    /// Returns `None` unless both parameters are present. A leading `?` is
    /// tolerated; values are percent-decoded, with `+` read as a space.
    #[must_use]
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut status = None;
        let mut token = None;
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "status" => status = Some(percent_decode(value)),
                "token" => token = Some(percent_decode(value)),
                _ => {}
            }
        }
        Some(Self {
            status: status?,
            token: token?,
        })
    }
}

/// Decode a `application/x-www-form-urlencoded` query value
///
/// `%XX` escapes become the named byte and `+` becomes a space. Malformed
/// escapes and invalid UTF-8 pass through untouched so a garbled redirect
/// fails the token comparison instead of panicking.
fn percent_decode(value: &str) -> String {
    let input = value.as_bytes();
    let mut bytes = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            b'%' => {
                let escape = input
                    .get(i + 1..i + 3)
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = escape {
                    bytes.push(byte);
                    i += 3;
                } else {
                    bytes.push(b'%');
                    i += 1;
                }
            }
            byte => {
                bytes.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Result of processing a page load
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockOutcome {
    /// Whether this load unlocked the profile
    pub unlocked: bool,
    /// Pending tree restored from the store, to resume editing
    pub restored_tree: Option<OrgNode>,
    /// Whether the caller must rewrite the URL without the query parameters
    pub strip_query: bool,
}

impl UnlockOutcome {
    fn unchanged() -> Self {
        Self {
            unlocked: false,
            restored_tree: None,
            strip_query: false,
        }
    }
}

/// Exactly-once unlock check performed on load
///
/// Known structural weakness, kept by contract: the token is a static
/// shared secret with no expiry, no server-side verification, and no
/// binding to a specific purchase. Anyone who learns it can self-unlock by
/// crafting the URL. A real fix is a server-verified receipt.
#[derive(Debug, Clone)]
pub struct UnlockGate {
    secret_token: String,
}

impl UnlockGate {
    /// Gate checking redirects against `secret_token`
    #[inline]
    #[must_use]
    pub fn new(secret_token: impl Into<String>) -> Self {
        Self {
            secret_token: secret_token.into(),
        }
    }

    /// Whether the profile is already unlocked
    #[must_use]
    pub fn is_unlocked(&self, store: &dyn KeyValueStore) -> bool {
        slots::PREMIUM_UNLOCKED.load_or_default(store)
    }

    /// Overlay decision for the current profile
    #[must_use]
    pub fn overlay_visible(
        &self,
        store: &dyn KeyValueStore,
        report_present: bool,
        streaming_finished: bool,
    ) -> bool {
        policy::overlay_visible(report_present, streaming_finished, self.is_unlocked(store))
    }

    /// Process the page-load query string
    ///
    /// On `status=success` with a matching token: persist the unlock flag
    /// (permanent for this store profile, no revocation path), restore any
    /// pending tree, and signal the caller to strip the query. A wrong
    /// token changes no state.
    pub fn process_return(&self, store: &dyn KeyValueStore, query: &str) -> UnlockOutcome {
        let Some(ret) = PaymentReturn::from_query(query) else {
            return UnlockOutcome::unchanged();
        };
        if ret.status != SUCCESS_STATUS {
            return UnlockOutcome::unchanged();
        }
        if ret.token != self.secret_token {
            tracing::warn!("payment return carried an invalid token");
            return UnlockOutcome::unchanged();
        }

        slots::PREMIUM_UNLOCKED.save(store, &true);
        let restored_tree = slots::PENDING_TREE.load(store);
        tracing::info!(restored = restored_tree.is_some(), "profile unlocked via payment return");
        UnlockOutcome {
            unlocked: true,
            restored_tree,
            strip_query: true,
        }
    }
}
