#![cfg(target_os = "windows")]

//! HIDP descriptor wrapper.
//!
//! [`HidpDescriptor`] owns a device's preparsed-data blob (as fetched via
//! `RIDI_PREPARSEDDATA`) and answers the capability and extraction queries
//! of [`ReportDescriptor`] through the Windows HID parser (`HidP_*`).
//!
//! ## Notes
//! - Global caps are read once at construction; the cap counts recorded
//!   there size the enumeration buffers.
//! - All queries run against the input report collection (`HidP_Input`)
//!   with link collection 0 (the top-level collection).

use core::mem::MaybeUninit;

use windows_sys::Win32::Devices::HumanInterfaceDevice::{
    HidP_GetButtonCaps, HidP_GetCaps, HidP_GetUsageValue, HidP_GetUsages, HidP_GetValueCaps,
    HidP_Input, HIDP_BUTTON_CAPS, HIDP_CAPS, HIDP_STATUS_SUCCESS, HIDP_VALUE_CAPS,
    PHIDP_PREPARSED_DATA,
};

use crate::descriptor::{RawButtonCap, RawValueCap, ReportDescriptor};
use crate::error::Error;

/// A preparsed input-report descriptor backed by the Windows HID parser.
pub struct HidpDescriptor {
    blob: Vec<u8>,
    num_value_caps: u16,
    num_button_caps: u16,
    input_report_len: u16,
}

impl HidpDescriptor {
    /// Wrap a preparsed-data blob and read its global caps.
    ///
    /// ### Errors
    /// [`Error::DescriptorUnavailable`] when `HidP_GetCaps` rejects the
    /// blob.
    pub fn new(blob: Vec<u8>) -> Result<Self, Error> {
        let mut caps = MaybeUninit::<HIDP_CAPS>::uninit();
        let status =
            unsafe { HidP_GetCaps(blob.as_ptr() as PHIDP_PREPARSED_DATA, caps.as_mut_ptr()) };
        if status != HIDP_STATUS_SUCCESS {
            return Err(Error::DescriptorUnavailable);
        }
        let caps = unsafe { caps.assume_init() };

        Ok(Self {
            blob,
            num_value_caps: caps.NumberInputValueCaps,
            num_button_caps: caps.NumberInputButtonCaps,
            input_report_len: caps.InputReportByteLength,
        })
    }

    fn ppd(&self) -> PHIDP_PREPARSED_DATA {
        self.blob.as_ptr() as PHIDP_PREPARSED_DATA
    }
}

impl ReportDescriptor for HidpDescriptor {
    fn input_report_len(&self) -> usize {
        self.input_report_len as usize
    }

    fn value_caps(&self) -> Result<Vec<RawValueCap>, Error> {
        if self.num_value_caps == 0 {
            return Ok(Vec::new());
        }

        let mut caps: Vec<HIDP_VALUE_CAPS> =
            vec![unsafe { core::mem::zeroed() }; self.num_value_caps as usize];
        let mut len = self.num_value_caps;

        let status =
            unsafe { HidP_GetValueCaps(HidP_Input, caps.as_mut_ptr(), &mut len, self.ppd()) };
        if status != HIDP_STATUS_SUCCESS {
            return Err(Error::DescriptorUnavailable);
        }
        caps.truncate(len as usize);

        let mut out = Vec::with_capacity(caps.len());
        for c in &caps {
            // Range and NotRange overlay the same union; read whichever
            // arm the cap declares.
            let usage_min = unsafe {
                if c.IsRange != 0 {
                    c.Anonymous.Range.UsageMin
                } else {
                    c.Anonymous.NotRange.Usage
                }
            };
            out.push(RawValueCap {
                usage_page: c.UsagePage,
                usage_min,
            });
        }
        Ok(out)
    }

    fn button_caps(&self) -> Result<Vec<RawButtonCap>, Error> {
        if self.num_button_caps == 0 {
            return Ok(Vec::new());
        }

        let mut caps: Vec<HIDP_BUTTON_CAPS> =
            vec![unsafe { core::mem::zeroed() }; self.num_button_caps as usize];
        let mut len = self.num_button_caps;

        let status =
            unsafe { HidP_GetButtonCaps(HidP_Input, caps.as_mut_ptr(), &mut len, self.ppd()) };
        if status != HIDP_STATUS_SUCCESS {
            return Err(Error::DescriptorUnavailable);
        }
        caps.truncate(len as usize);

        let mut out = Vec::with_capacity(caps.len());
        for c in &caps {
            let (usage_min, usage_max) = unsafe {
                if c.IsRange != 0 {
                    let r = c.Anonymous.Range;
                    (r.UsageMin, r.UsageMax)
                } else {
                    let u = c.Anonymous.NotRange.Usage;
                    (u, u)
                }
            };
            out.push(RawButtonCap {
                usage_page: c.UsagePage,
                usage_min,
                usage_max,
            });
        }
        Ok(out)
    }

    fn usage_value(&self, usage_page: u16, usage: u16, report: &[u8]) -> Result<i32, Error> {
        // HIDP takes a mutable report pointer even for reads.
        let mut buf = report.to_vec();
        let mut value: u32 = 0;

        let status = unsafe {
            HidP_GetUsageValue(
                HidP_Input,
                usage_page,
                0,
                usage,
                &mut value,
                self.ppd(),
                buf.as_mut_ptr(),
                buf.len() as u32,
            )
        };
        if status != HIDP_STATUS_SUCCESS {
            return Err(Error::FieldExtraction { usage_page, usage });
        }

        Ok(value as i32)
    }

    fn active_usages(
        &self,
        usage_page: u16,
        span: usize,
        report: &[u8],
    ) -> Result<Vec<u16>, Error> {
        let mut buf = report.to_vec();
        let mut usages = vec![0u16; span.max(1)];
        let mut len = usages.len() as u32;

        let status = unsafe {
            HidP_GetUsages(
                HidP_Input,
                usage_page,
                0,
                usages.as_mut_ptr(),
                &mut len,
                self.ppd(),
                buf.as_mut_ptr(),
                buf.len() as u32,
            )
        };
        if status != HIDP_STATUS_SUCCESS {
            return Err(Error::FieldExtraction {
                usage_page,
                usage: 0,
            });
        }

        usages.truncate(len as usize);
        Ok(usages)
    }
}
