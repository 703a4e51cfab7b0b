//! Report decoding.
//!
//! [`ReportDecoder`] owns the session's [`GamepadState`] and the
//! state-change callback. Each call to [`decode`](ReportDecoder::decode)
//! takes the device's descriptor, the inspected capabilities, and one raw
//! report, and either commits a fully updated snapshot (invoking the
//! callback exactly once) or fails leaving the snapshot untouched.
//!
//! ## Per-field failures
//! A single axis failing to extract does not abort the decode: that slot
//! keeps its prior value and the rest of the state still updates. A button
//! range whose active-usage query fails contributes no pressed flags for
//! this report.

use crate::caps::{AxisUsage, DeviceCapabilities};
use crate::descriptor::ReportDescriptor;
use crate::error::Error;
use crate::state::{GamepadState, MAX_BUTTONS};

/// Decodes raw reports into the session's retained [`GamepadState`].
pub struct ReportDecoder {
    state: GamepadState,
    on_update: Box<dyn FnMut(&GamepadState)>,
}

impl ReportDecoder {
    /// Create a decoder with a neutral snapshot (axes zero, hat `-1`, no
    /// buttons pressed) and bind the state-change callback.
    pub fn new(on_update: impl FnMut(&GamepadState) + 'static) -> Self {
        Self {
            state: GamepadState::default(),
            on_update: Box::new(on_update),
        }
    }

    /// Last committed snapshot.
    pub fn state(&self) -> &GamepadState {
        &self.state
    }

    /// Decode one raw report against `caps` and commit the result.
    ///
    /// Fails with [`Error::MalformedReport`] when the report length does
    /// not match the descriptor; the snapshot is left as it was and the
    /// callback is not invoked. Decoding the same report twice commits the
    /// same state twice.
    pub fn decode(
        &mut self,
        desc: &dyn ReportDescriptor,
        caps: &DeviceCapabilities,
        report: &[u8],
    ) -> Result<(), Error> {
        if report.len() != desc.input_report_len() {
            return Err(Error::MalformedReport);
        }

        // All mutation is staged on a scratch copy; a failed decode can
        // never publish a half-updated snapshot.
        let mut next = self.state;

        // Value pass, in descriptor enumeration order. Stops one short of
        // the end: the last declared value field is never consulted.
        let upto = caps.values.len().saturating_sub(1);
        for field in &caps.values[..upto] {
            match desc.usage_value(field.usage_page, field.usage.usage(), report) {
                Ok(v) => match field.usage {
                    AxisUsage::X => next.left_x = v,
                    AxisUsage::Y => next.left_y = v,
                    AxisUsage::Z => next.left_z = v,
                    AxisUsage::Rx => next.right_x = v,
                    AxisUsage::Ry => next.right_y = v,
                    AxisUsage::Rz => next.right_z = v,
                    AxisUsage::Hat => next.hat = v,
                },
                // Slot keeps its prior value; one bad axis must not block
                // the rest of the state.
                Err(_err) => {
                    #[cfg(feature = "debug-log")]
                    eprintln!("[DECODE] usage value failed: {_err}");
                }
            }
        }

        // Button state is fully re-derived from this report; nothing is
        // sticky across decodes.
        next.buttons = [false; MAX_BUTTONS];
        for range in &caps.buttons {
            let span = usize::from(range.usage_max - range.usage_min) + 1;
            let usages = match desc.active_usages(range.usage_page, span, report) {
                Ok(usages) => usages,
                Err(_err) => {
                    #[cfg(feature = "debug-log")]
                    eprintln!("[DECODE] active usages failed: {_err}");
                    continue;
                }
            };
            // Only the first active usage in a range is recorded.
            if let Some(&usage) = usages.first() {
                let idx = usize::from(usage).wrapping_sub(1);
                if idx < MAX_BUTTONS {
                    next.buttons[idx] = true;
                }
            }
        }

        self.state = next;
        (self.on_update)(&self.state);
        Ok(())
    }
}
