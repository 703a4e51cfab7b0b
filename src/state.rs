//! Gamepad state snapshots.
//!
//! [`GamepadState`] is the owned, read-only view handed to the state
//! callback after every successful decode. One long-lived instance exists
//! per device session; the decoder mutates it in place and never publishes
//! a partial update, so consumers only ever observe whole snapshots.
//!
//! ## Value conventions
//! - **Axes:** raw logical values as reported by the device descriptor,
//!   not normalized.
//! - **Hat (POV/D-pad):** `-1` = centered or no input received yet;
//!   anything else is the device's raw hat value.
//! - **Buttons:** `buttons[n]` is the flag for HID button usage `n + 1`.

use serde::{Deserialize, Serialize};

/// Number of button flags a snapshot carries. Usages above this are not
/// representable and are ignored by the decoder.
pub const MAX_BUTTONS: usize = 13;

/// Decoded gamepad state at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadState {
    /// Left stick horizontal (Generic Desktop X).
    pub left_x: i32,
    /// Left stick vertical (Generic Desktop Y).
    pub left_y: i32,
    /// Left trigger equivalent (Generic Desktop Z).
    pub left_z: i32,
    /// Right stick horizontal (Generic Desktop Rx).
    pub right_x: i32,
    /// Right stick vertical (Generic Desktop Ry).
    pub right_y: i32,
    /// Right trigger equivalent (Generic Desktop Rz).
    pub right_z: i32,
    /// Hat switch value; `-1` = centered / no input yet.
    pub hat: i32,
    /// Button flags indexed by HID button usage minus one.
    pub buttons: [bool; MAX_BUTTONS],
}

impl Default for GamepadState {
    fn default() -> Self {
        Self {
            left_x: 0,
            left_y: 0,
            left_z: 0,
            right_x: 0,
            right_y: 0,
            right_z: 0,
            hat: -1,
            buttons: [false; MAX_BUTTONS],
        }
    }
}

impl GamepadState {
    /// Flag for a 1-based button usage (`false` when out of range).
    #[inline]
    pub fn button(&self, usage: u16) -> bool {
        let Some(idx) = usage.checked_sub(1) else {
            return false;
        };
        self.buttons
            .get(usize::from(idx))
            .copied()
            .unwrap_or(false)
    }
}
