//! Merchant identity and request authentication.
//!
//! Every report request carries two headers: `Merchant` (the channel's public
//! key) and `Signature` (see [`RequestSigner`]). A [`Channel`] bundles the key
//! pair with a display name; it is the only place key material lives.
//!
//! # Examples
//!
//! ```
//! use solidgate_reporting::auth::{Channel, RequestSigner};
//!
//! let channel = Channel::new("main-shop", "api_pk_123", "api_sk_456");
//! let signer = RequestSigner::new(channel);
//!
//! let signature = signer.sign(br#"{"date_from": "2022-04-01 00:00:00"}"#)?;
//! assert!(!signature.is_empty());
//! # Ok::<(), solidgate_reporting::ReportError>(())
//! ```

use std::fmt;

use serde::Serialize;
use zeroize::Zeroize;

pub mod signer;

#[cfg(test)]
mod tests;

pub use signer::{RequestSigner, encode_body};

/// A merchant channel: one key pair registered with the reporting API.
///
/// Keys never leave this type through `Serialize` or `Debug`, and both are
/// zeroized when the channel is dropped.
///
/// # Examples
///
/// ```
/// use solidgate_reporting::auth::Channel;
///
/// let channel = Channel::apm("paypal", "api_pk_1", "api_sk_1");
/// assert!(channel.is_apm());
///
/// let json = serde_json::to_string(&channel).unwrap();
/// assert_eq!(json, r#"{"name":"paypal","is_apm":true}"#);
/// ```
#[derive(Clone, Serialize)]
pub struct Channel {
    name: String,
    #[serde(skip)]
    public_key: String,
    #[serde(skip)]
    private_key: String,
    is_apm: bool,
}

impl Channel {
    /// Creates a card-payments channel.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            is_apm: false,
        }
    }

    /// Creates an alternative-payment-method channel.
    #[must_use]
    pub fn apm(
        name: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        let mut channel = Self::new(name, public_key, private_key);
        channel.is_apm = true;
        channel
    }

    /// Channel display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Public key, sent as the `Merchant` header.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Whether this channel processes alternative payment methods.
    #[must_use]
    pub const fn is_apm(&self) -> bool {
        self.is_apm
    }

    pub(crate) fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("public_key", &"[REDACTED]")
            .field("private_key", &"[REDACTED]")
            .field("is_apm", &self.is_apm)
            .finish()
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.public_key.zeroize();
        self.private_key.zeroize();
    }
}
