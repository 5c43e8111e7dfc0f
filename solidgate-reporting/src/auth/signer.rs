//! Request signing for the reporting API.
//!
//! The API authenticates a request by recomputing an HMAC over the exact body
//! bytes it received. The recipe is fixed by the API:
//!
//! 1. `data = public_key + body + public_key`
//! 2. `mac = HMAC-SHA512(key = private_key, data)`
//! 3. `signature = base64(hex(mac))`, i.e. Base64 of the lowercase hex *text*,
//!    not of the raw digest
//!
//! Bodies are produced by [`encode_body`], which writes JSON with the same
//! separators and ASCII escaping as the API's reference client so that
//! signatures match byte for byte.

use std::io;

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::ser::Formatter;
use sha2::Sha512;
use tracing::instrument;

use crate::{
    auth::Channel,
    error::{ReportError, Result},
};

type HmacSha512 = Hmac<Sha512>;

/// Signs report request bodies on behalf of one [`Channel`].
#[derive(Debug, Clone)]
pub struct RequestSigner {
    channel: Channel,
}

impl RequestSigner {
    /// Creates a signer for the given channel.
    #[must_use]
    pub const fn new(channel: Channel) -> Self {
        Self { channel }
    }

    /// Channel whose keys this signer uses.
    #[must_use]
    pub const fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Value of the `Merchant` header.
    #[must_use]
    pub fn merchant(&self) -> &str {
        self.channel.public_key()
    }

    /// Computes the `Signature` header value for a request body.
    ///
    /// Signing is deterministic: there is no timestamp or nonce, so identical
    /// keys and bodies always produce identical signatures.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Signature`] if the HMAC cannot be keyed.
    ///
    /// # Examples
    ///
    /// ```
    /// use solidgate_reporting::auth::{Channel, RequestSigner};
    ///
    /// let signer = RequestSigner::new(Channel::new("shop", "pk", "sk"));
    /// let first = signer.sign(b"{}")?;
    /// let second = signer.sign(b"{}")?;
    /// assert_eq!(first, second);
    /// # Ok::<(), solidgate_reporting::ReportError>(())
    /// ```
    #[instrument(skip(self, body), fields(channel = self.channel.name(), body_len = body.len()))]
    pub fn sign(&self, body: &[u8]) -> Result<String> {
        let public_key = self.channel.public_key().as_bytes();

        let mut mac = HmacSha512::new_from_slice(self.channel.private_key().as_bytes())
            .map_err(|e| ReportError::Signature(e.to_string()))?;
        mac.update(public_key);
        mac.update(body);
        mac.update(public_key);

        let hex_digest = hex::encode(mac.finalize().into_bytes());
        Ok(STANDARD.encode(hex_digest.as_bytes()))
    }
}

/// Serializes a request body the way the reporting API expects to see it.
///
/// Members are separated by `", "`, keys from values by `": "`, field order
/// follows declaration order, and non-ASCII characters are written as
/// `\uXXXX` escapes.
///
/// # Errors
///
/// Returns [`ReportError::Serialization`] if `body` cannot be represented as JSON.
///
/// # Examples
///
/// ```
/// use solidgate_reporting::auth::encode_body;
///
/// let body = serde_json::json!({ "date_from": "2022-04-01 00:00:00", "note": "é" });
/// let bytes = encode_body(&body)?;
/// assert_eq!(bytes, br#"{"date_from": "2022-04-01 00:00:00", "note": "\u00e9"}"#);
/// # Ok::<(), solidgate_reporting::ReportError>(())
/// ```
pub fn encode_body<T: Serialize + ?Sized>(body: &T) -> Result<Vec<u8>> {
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), SpacedAsciiFormatter);
    body.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(ch.encode_utf8(&mut [0; 4]).as_bytes())?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}
