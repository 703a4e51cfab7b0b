#![cfg(target_os = "windows")]

//! Windows Raw Input + HIDP backend.
//!
//! - **Raw Input** plumbing: `WM_INPUT` payload reads, preparsed-data
//!   retrieval, gamepad-sink registration
//! - **HIDP** descriptor wrapper implementing
//!   [`ReportDescriptor`](crate::descriptor::ReportDescriptor)
//! - **Session** lifecycle driving inspection and decoding per event
//!
//! The host application owns the Win32 message loop and forwards each
//! `WM_INPUT` lparam into [`DeviceSession::on_raw_input`].

pub mod hidp;
pub mod raw_input;
pub mod session;

pub use hidp::HidpDescriptor;
pub use session::DeviceSession;
