#![cfg(target_os = "windows")]

//! Windows Raw Input plumbing.
//!
//! This module is intentionally "dumb": it reads `WM_INPUT` payloads,
//! fetches a device's preparsed capability blob, and performs the one-time
//! gamepad-sink registration. Interpretation of reports lives in the
//! decoder; lifecycle lives in [`session`](super::session).
//!
//! ## Conventions
//! - Every OS query uses the size-query/fill two-call pattern; a failure
//!   in either call degrades to `None`/an error, never a panic.
//! - `WM_INPUT` payloads are copied out immediately. Nothing here retains
//!   OS-owned memory across calls.

use core::ffi::c_void;
use core::mem::{offset_of, size_of};

use windows_sys::Win32::Foundation::{GetLastError, HANDLE, HWND};
use windows_sys::Win32::UI::Input::{
    GetRawInputData, GetRawInputDeviceInfoW, RegisterRawInputDevices, RAWHID, RAWINPUTDEVICE,
    RAWINPUTHEADER, RIDEV_INPUTSINK, RIDI_PREPARSEDDATA, RID_INPUT, RIM_TYPEHID,
};

use crate::error::Error;

// Generic Desktop / Game Pad: the one device class this crate registers for.
const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x01;
const USAGE_GAME_PAD: u16 = 0x05;

/// One HID input report lifted out of a `WM_INPUT` payload.
pub(crate) struct HidReport {
    /// Raw Input device handle that produced the event.
    pub hdevice: HANDLE,
    /// Report bytes (first of `dwCount`; repeats in the same event are
    /// dropped).
    pub data: Vec<u8>,
}

/// Register this process for gamepad raw input, delivered to `hwnd` even
/// while the window is unfocused (`RIDEV_INPUTSINK`).
///
/// Registration is process-lifetime; there is no unregister counterpart.
pub fn register_gamepad_sink(hwnd: HWND) -> Result<(), Error> {
    let rid = RAWINPUTDEVICE {
        usUsagePage: USAGE_PAGE_GENERIC_DESKTOP,
        usUsage: USAGE_GAME_PAD,
        dwFlags: RIDEV_INPUTSINK,
        hwndTarget: hwnd,
    };

    let ok = unsafe { RegisterRawInputDevices(&rid, 1, size_of::<RAWINPUTDEVICE>() as u32) };
    if ok == 0 {
        return Err(Error::Registration {
            code: unsafe { GetLastError() },
        });
    }
    Ok(())
}

/// Read one `WM_INPUT` payload and extract the HID report it carries.
///
/// Returns `None` for non-HID events (keyboard/mouse) and for payloads the
/// OS refuses to hand over or hands over at an unexpected size.
pub(crate) fn read_wm_input(lparam: isize) -> Option<HidReport> {
    unsafe {
        // Query size
        let mut size: u32 = 0;
        let r0 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            core::ptr::null_mut(),
            &mut size,
            size_of::<RAWINPUTHEADER>() as u32,
        );
        if r0 == u32::MAX || size == 0 {
            return None;
        }

        // Read buffer
        let mut buf = vec![0u8; size as usize];
        let r1 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            buf.as_mut_ptr() as *mut c_void,
            &mut size,
            size_of::<RAWINPUTHEADER>() as u32,
        );
        if r1 != size {
            #[cfg(feature = "debug-log")]
            eprintln!("[RAWINPUT] GetRawInputData size mismatch: got {r1}, expected {size}");
            return None;
        }

        parse_hid_payload(&buf)
    }
}

/// Parse a raw `RID_INPUT` payload into a [`HidReport`], if it is one.
fn parse_hid_payload(buf: &[u8]) -> Option<HidReport> {
    let hdr_sz = size_of::<RAWINPUTHEADER>();
    if buf.len() < hdr_sz {
        return None;
    }

    unsafe {
        // Header only; the RAWINPUT payload that follows is variable-sized.
        let hdr: RAWINPUTHEADER = core::ptr::read_unaligned(buf.as_ptr() as *const RAWINPUTHEADER);
        if hdr.dwType != RIM_TYPEHID {
            return None;
        }

        let need = hdr_sz + size_of::<RAWHID>();
        if buf.len() < need {
            return None;
        }
        let hid: RAWHID = core::ptr::read_unaligned(buf.as_ptr().add(hdr_sz) as *const RAWHID);

        let report_len = hid.dwSizeHid as usize;
        let start = hdr_sz + offset_of!(RAWHID, bRawData);
        if hid.dwCount == 0 || report_len == 0 || buf.len() < start + report_len {
            return None;
        }

        Some(HidReport {
            hdevice: hdr.hDevice,
            data: buf[start..start + report_len].to_vec(),
        })
    }
}

/// Fetch the preparsed capability blob for a Raw Input device handle
/// (`RIDI_PREPARSEDDATA`).
///
/// ### Errors
/// [`Error::DescriptorUnavailable`] when either the size query or the fill
/// fails; the device has likely been unplugged between the event and this
/// call.
pub(crate) fn preparsed_data(hdevice: HANDLE) -> Result<Vec<u8>, Error> {
    unsafe {
        // Query required size in bytes.
        let mut size: u32 = 0;
        let r0 = GetRawInputDeviceInfoW(
            hdevice,
            RIDI_PREPARSEDDATA,
            core::ptr::null_mut(),
            &mut size,
        );
        if r0 != 0 || size == 0 {
            return Err(Error::DescriptorUnavailable);
        }

        let mut blob = vec![0u8; size as usize];
        let r1 = GetRawInputDeviceInfoW(
            hdevice,
            RIDI_PREPARSEDDATA,
            blob.as_mut_ptr() as *mut c_void,
            &mut size,
        );
        if r1 == u32::MAX {
            return Err(Error::DescriptorUnavailable);
        }

        Ok(blob)
    }
}
