//! The preparsed-descriptor seam.
//!
//! HID report layout is device-defined: which fields a report contains,
//! where they sit, and what usage each carries is only knowable through
//! the device's preparsed capability descriptor. [`ReportDescriptor`]
//! abstracts that descriptor so the inspector and decoder stay
//! platform-neutral. The Windows backend implements it over a `HidP_*`
//! preparsed-data blob; tests implement it over a synthetic fixed layout.

use crate::error::Error;

/// One declared input value field, as enumerated from the descriptor.
///
/// `usage_min` is the field's usage (or the first usage of its range);
/// recognition of the axis set keys on this value.
#[derive(Clone, Copy, Debug)]
pub struct RawValueCap {
    pub usage_page: u16,
    pub usage_min: u16,
}

/// One declared input button field, expanded to its usage range.
///
/// Single-usage fields are represented with `usage_min == usage_max`.
#[derive(Clone, Copy, Debug)]
pub struct RawButtonCap {
    pub usage_page: u16,
    pub usage_min: u16,
    pub usage_max: u16,
}

/// A device's preparsed input-report descriptor.
///
/// Capability enumeration failures surface as
/// [`Error::DescriptorUnavailable`]; per-field extraction failures as
/// [`Error::FieldExtraction`]. Implementations must not retain the
/// `report` slices they are handed.
pub trait ReportDescriptor {
    /// Byte length of one input report, as the descriptor declares it.
    fn input_report_len(&self) -> usize;

    /// Declared input value (axis/hat) fields, in descriptor order.
    fn value_caps(&self) -> Result<Vec<RawValueCap>, Error>;

    /// Declared input button fields, in descriptor order.
    fn button_caps(&self) -> Result<Vec<RawButtonCap>, Error>;

    /// Extract the numeric value of one usage from a report.
    fn usage_value(&self, usage_page: u16, usage: u16, report: &[u8]) -> Result<i32, Error>;

    /// List the usages currently set on a page, capped at `span` entries.
    fn active_usages(
        &self,
        usage_page: u16,
        span: usize,
        report: &[u8],
    ) -> Result<Vec<u16>, Error>;
}
