#![cfg(target_os = "windows")]

//! Device session lifecycle.
//!
//! [`DeviceSession`] binds a state callback, performs the one-time
//! gamepad-sink registration, and turns each `WM_INPUT` event into one
//! inspect + decode pass. Capabilities are re-derived per event; reports
//! may arrive from more than one device handle over the session's life.
//!
//! Dropping the session needs no HID teardown: Raw Input registration is
//! process-lifetime.

use windows_sys::Win32::Foundation::HWND;

use crate::caps::inspect;
use crate::decode::ReportDecoder;
use crate::error::Error;
use crate::state::GamepadState;

use super::hidp::HidpDescriptor;
use super::raw_input::{preparsed_data, read_wm_input, register_gamepad_sink};

/// Owns a [`ReportDecoder`] and feeds it raw-input events.
pub struct DeviceSession {
    decoder: ReportDecoder,
}

impl DeviceSession {
    /// Register for gamepad raw input targeted at `hwnd` and bind the
    /// state-change callback.
    ///
    /// ### Errors
    /// [`Error::Registration`] when the OS rejects the registration.
    pub fn new(
        hwnd: HWND,
        on_update: impl FnMut(&GamepadState) + 'static,
    ) -> Result<Self, Error> {
        register_gamepad_sink(hwnd)?;
        Ok(Self {
            decoder: ReportDecoder::new(on_update),
        })
    }

    /// Last committed snapshot.
    pub fn state(&self) -> &GamepadState {
        self.decoder.state()
    }

    /// Handle one `WM_INPUT` event (the message's lparam).
    ///
    /// Returns `true` when a report was decoded and the callback invoked;
    /// `false` when the event was not a HID gamepad report or any stage
    /// failed. Failures never disturb the retained snapshot; the next
    /// event retries from scratch.
    pub fn on_raw_input(&mut self, lparam: isize) -> bool {
        let Some(report) = read_wm_input(lparam) else {
            return false;
        };

        let result = preparsed_data(report.hdevice)
            .and_then(HidpDescriptor::new)
            .and_then(|desc| {
                let caps = inspect(&desc)?;
                self.decoder.decode(&desc, &caps, &report.data)
            });

        match result {
            Ok(()) => true,
            Err(_err) => {
                #[cfg(feature = "debug-log")]
                eprintln!("[SESSION] event dropped: {_err}");
                false
            }
        }
    }
}
