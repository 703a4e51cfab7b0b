//! Descriptor-driven decoding of HID gamepad input reports.
//!
//! The platform-neutral core (capability inspection in [`caps`], report
//! decoding in [`decode`], the [`GamepadState`] snapshot) is driven
//! through the [`ReportDescriptor`] seam. The Windows backend implements
//! that seam over Raw Input and the HIDP parser; see
//! [`backends::windows`].

pub mod backends;
pub mod caps;
pub mod decode;
pub mod descriptor;
pub mod error;
pub mod state;

pub use caps::*;
pub use decode::*;
pub use descriptor::*;
pub use error::*;
pub use state::*;
