//! Descriptor inspection.
//!
//! [`inspect`] reduces a device's declared capabilities to the fields this
//! crate decodes: value fields whose usage falls in the recognized axis
//! set, and button ranges on the Button page. Everything else a vendor
//! descriptor declares is skipped without error; extra fields are the
//! norm, not a fault.
//!
//! Capabilities are cheap to derive and carry no OS handles, so callers
//! re-derive them per event rather than caching across device handles.

use crate::descriptor::{RawButtonCap, RawValueCap, ReportDescriptor};
use crate::error::Error;

/// HID Button usage page. Button ranges on any other page are ignored.
pub const BUTTON_PAGE: u16 = 0x09;

// Generic Desktop usage IDs for the recognized axis set.
const USAGE_X: u16 = 0x30;
const USAGE_Y: u16 = 0x31;
const USAGE_Z: u16 = 0x32;
const USAGE_RX: u16 = 0x33;
const USAGE_RY: u16 = 0x34;
const USAGE_RZ: u16 = 0x35;
const USAGE_HAT: u16 = 0x39;

/// The fixed set of value usages the decoder maps into [`GamepadState`]
/// slots.
///
/// [`GamepadState`]: crate::state::GamepadState
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisUsage {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Hat,
}

impl AxisUsage {
    /// Map a usage ID into the recognized set. Recognition keys on the
    /// usage ID alone; the usage page is carried through to extraction.
    pub fn from_usage(usage: u16) -> Option<Self> {
        match usage {
            USAGE_X => Some(Self::X),
            USAGE_Y => Some(Self::Y),
            USAGE_Z => Some(Self::Z),
            USAGE_RX => Some(Self::Rx),
            USAGE_RY => Some(Self::Ry),
            USAGE_RZ => Some(Self::Rz),
            USAGE_HAT => Some(Self::Hat),
            _ => None,
        }
    }

    /// The HID usage ID this axis is extracted through.
    pub fn usage(self) -> u16 {
        match self {
            Self::X => USAGE_X,
            Self::Y => USAGE_Y,
            Self::Z => USAGE_Z,
            Self::Rx => USAGE_RX,
            Self::Ry => USAGE_RY,
            Self::Rz => USAGE_RZ,
            Self::Hat => USAGE_HAT,
        }
    }
}

/// A recognized value field.
#[derive(Clone, Copy, Debug)]
pub struct ValueField {
    pub usage_page: u16,
    pub usage: AxisUsage,
}

/// A button usage range on the Button page.
#[derive(Clone, Copy, Debug)]
pub struct ButtonRange {
    pub usage_page: u16,
    pub usage_min: u16,
    pub usage_max: u16,
}

/// The decodable subset of a device's declared input capabilities.
///
/// `values` preserves descriptor enumeration order; the decoder depends
/// on it.
#[derive(Clone, Debug, Default)]
pub struct DeviceCapabilities {
    pub values: Vec<ValueField>,
    pub buttons: Vec<ButtonRange>,
}

/// Enumerate a descriptor's input capabilities and keep the decodable
/// subset.
///
/// Either enumeration failing means the descriptor cannot be trusted at
/// all and surfaces as [`Error::DescriptorUnavailable`].
pub fn inspect(desc: &dyn ReportDescriptor) -> Result<DeviceCapabilities, Error> {
    let values = recognize_values(&desc.value_caps()?);
    let buttons = keep_button_ranges(&desc.button_caps()?);
    Ok(DeviceCapabilities { values, buttons })
}

fn recognize_values(caps: &[RawValueCap]) -> Vec<ValueField> {
    caps.iter()
        .filter_map(|c| {
            let usage = AxisUsage::from_usage(c.usage_min)?;
            Some(ValueField {
                usage_page: c.usage_page,
                usage,
            })
        })
        .collect()
}

fn keep_button_ranges(caps: &[RawButtonCap]) -> Vec<ButtonRange> {
    caps.iter()
        .filter(|c| c.usage_page == BUTTON_PAGE && c.usage_min <= c.usage_max)
        .map(|c| ButtonRange {
            usage_page: c.usage_page,
            usage_min: c.usage_min,
            usage_max: c.usage_max,
        })
        .collect()
}
