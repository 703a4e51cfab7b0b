//! Platform backends.
//!
//! Implementations of the [`ReportDescriptor`](crate::descriptor::ReportDescriptor)
//! seam and the event plumbing that feeds it. Only Windows is supported:
//! reports arrive through Raw Input and descriptors through the HIDP
//! parser.

#[cfg(target_os = "windows")]
#[cfg_attr(docsrs, doc(cfg(target_os = "windows")))]
pub mod windows;
