//! The unit of input data.

use bytes::Bytes;

use crate::error::ConnectorError;

/// One unit of input: an optional opaque key and a text payload.
///
/// Records are immutable once read. The word-count pipeline ignores the
/// key; it is carried so sources that have one (message logs, keyed
/// queues) don't lose it on the way through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: Option<Bytes>,
    value: Bytes,
}

impl Record {
    /// Creates a record with no key.
    #[must_use]
    pub fn new(value: impl Into<Bytes>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    /// Creates a record with a key.
    #[must_use]
    pub fn with_key(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }

    /// The record key, if any.
    #[must_use]
    pub fn key(&self) -> Option<&Bytes> {
        self.key.as_ref()
    }

    /// The raw payload bytes.
    #[must_use]
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Decodes the payload as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::MalformedRecord`] if the payload is
    /// not valid UTF-8. How that is handled (skip vs. fail) is the
    /// pipeline's [`ErrorStrategy`](crate::error_handling::ErrorStrategy)
    /// decision, not the record's.
    pub fn text(&self) -> Result<&str, ConnectorError> {
        std::str::from_utf8(&self.value)
            .map_err(|e| ConnectorError::MalformedRecord(format!("invalid UTF-8 payload: {e}")))
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// `true` if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&str> for Record {
    fn from(text: &str) -> Self {
        Self::new(Bytes::copy_from_slice(text.as_bytes()))
    }
}
