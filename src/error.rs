//! Error taxonomy.
//!
//! Decoding failures are fatal only to the event that produced them: the
//! retained snapshot is never disturbed, and the next raw-input event
//! retries from scratch. [`Error::FieldExtraction`] is the one non-fatal
//! case: the decoder swallows it per field and keeps the slot's prior
//! value.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The preparsed capability descriptor could not be retrieved or its
    /// value/button capabilities could not be enumerated. The device has
    /// likely been unplugged or the driver is misbehaving.
    #[error("device descriptor unavailable")]
    DescriptorUnavailable,

    /// The report buffer does not match the size the descriptor declares
    /// for input reports.
    #[error("malformed input report")]
    MalformedReport,

    /// A single usage could not be extracted from the report. `usage` is
    /// `0` when the failure covers a whole usage page rather than one
    /// field.
    #[error("extraction failed for usage {usage:#04x} on page {usage_page:#04x}")]
    FieldExtraction { usage_page: u16, usage: u16 },

    /// Raw Input registration was rejected by the OS (`GetLastError` code).
    #[error("raw input registration failed (os error {code})")]
    Registration { code: u32 },
}
