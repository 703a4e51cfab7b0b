//! Decoder behavior over a synthetic preparsed descriptor.
//!
//! The fake descriptor uses a fixed layout so every property can be pinned
//! down without OS involvement: value field `i` (declaration order) owns
//! report bytes `[2*i, 2*i + 1]` as a little-endian `i16`, and the final
//! two bytes hold a button bitmask where bit `n` means Button-page usage
//! `n + 1` is active.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use rawpad::{
    inspect, Error, GamepadState, RawButtonCap, RawValueCap, ReportDecoder, ReportDescriptor,
};

const GENERIC_DESKTOP: u16 = 0x01;
const BUTTON_PAGE: u16 = 0x09;

const USAGE_X: u16 = 0x30;
const USAGE_Y: u16 = 0x31;
const USAGE_Z: u16 = 0x32;
const USAGE_RX: u16 = 0x33;
const USAGE_RY: u16 = 0x34;
const USAGE_RZ: u16 = 0x35;
const USAGE_HAT: u16 = 0x39;

struct FakeDescriptor {
    values: Vec<RawValueCap>,
    buttons: Vec<RawButtonCap>,
    report_len: usize,
    fail_caps: bool,
    fail_usages: HashSet<u16>,
}

impl FakeDescriptor {
    /// Standard gamepad shape: X, Y, Z, Rx, Ry, Rz, Hat in declaration
    /// order plus one 12-button range.
    fn gamepad() -> Self {
        let values = [USAGE_X, USAGE_Y, USAGE_Z, USAGE_RX, USAGE_RY, USAGE_RZ, USAGE_HAT]
            .into_iter()
            .map(|usage_min| RawValueCap {
                usage_page: GENERIC_DESKTOP,
                usage_min,
            })
            .collect::<Vec<_>>();
        let report_len = values.len() * 2 + 2;

        Self {
            values,
            buttons: vec![RawButtonCap {
                usage_page: BUTTON_PAGE,
                usage_min: 1,
                usage_max: 12,
            }],
            report_len,
            fail_caps: false,
            fail_usages: HashSet::new(),
        }
    }

    fn slot_of(&self, usage_page: u16, usage: u16) -> Option<usize> {
        self.values
            .iter()
            .position(|v| v.usage_page == usage_page && v.usage_min == usage)
    }

    /// Build a report encoding the given `(usage, value)` pairs and the
    /// given active button usages.
    fn report(&self, fields: &[(u16, i16)], active_buttons: &[u16]) -> Vec<u8> {
        let mut buf = vec![0u8; self.report_len];
        for &(usage, value) in fields {
            let slot = self
                .slot_of(GENERIC_DESKTOP, usage)
                .expect("usage not declared by this descriptor");
            buf[2 * slot..2 * slot + 2].copy_from_slice(&value.to_le_bytes());
        }

        let mut mask: u16 = 0;
        for &usage in active_buttons {
            assert!((1..=16).contains(&usage), "fake supports usages 1..=16");
            mask |= 1 << (usage - 1);
        }
        let at = self.report_len - 2;
        buf[at..].copy_from_slice(&mask.to_le_bytes());
        buf
    }
}

impl ReportDescriptor for FakeDescriptor {
    fn input_report_len(&self) -> usize {
        self.report_len
    }

    fn value_caps(&self) -> Result<Vec<RawValueCap>, Error> {
        if self.fail_caps {
            return Err(Error::DescriptorUnavailable);
        }
        Ok(self.values.clone())
    }

    fn button_caps(&self) -> Result<Vec<RawButtonCap>, Error> {
        if self.fail_caps {
            return Err(Error::DescriptorUnavailable);
        }
        Ok(self.buttons.clone())
    }

    fn usage_value(&self, usage_page: u16, usage: u16, report: &[u8]) -> Result<i32, Error> {
        if self.fail_usages.contains(&usage) {
            return Err(Error::FieldExtraction { usage_page, usage });
        }
        let slot = self
            .slot_of(usage_page, usage)
            .ok_or(Error::FieldExtraction { usage_page, usage })?;
        let raw = i16::from_le_bytes([report[2 * slot], report[2 * slot + 1]]);
        Ok(i32::from(raw))
    }

    fn active_usages(
        &self,
        usage_page: u16,
        span: usize,
        report: &[u8],
    ) -> Result<Vec<u16>, Error> {
        if usage_page != BUTTON_PAGE {
            return Err(Error::FieldExtraction {
                usage_page,
                usage: 0,
            });
        }
        let at = self.report_len - 2;
        let mask = u16::from_le_bytes([report[at], report[at + 1]]);
        Ok((0u16..16)
            .filter(|b| mask & (1 << b) != 0)
            .map(|b| b + 1)
            .take(span)
            .collect())
    }
}

fn decoder_with_log() -> (ReportDecoder, Rc<RefCell<Vec<GamepadState>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let decoder = ReportDecoder::new(move |state: &GamepadState| sink.borrow_mut().push(*state));
    (decoder, log)
}

#[test]
fn recognized_axes_decode_to_their_slots() {
    let desc = FakeDescriptor::gamepad();
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, log) = decoder_with_log();

    let report = desc.report(
        &[
            (USAGE_X, 100),
            (USAGE_Y, -200),
            (USAGE_Z, 30),
            (USAGE_RX, 40),
            (USAGE_RY, 50),
            (USAGE_RZ, 60),
        ],
        &[],
    );
    decoder.decode(&desc, &caps, &report).expect("decode");

    let state = decoder.state();
    assert_eq!(state.left_x, 100);
    assert_eq!(state.left_y, -200);
    assert_eq!(state.left_z, 30);
    assert_eq!(state.right_x, 40);
    assert_eq!(state.right_y, 50);
    assert_eq!(state.right_z, 60);
    assert_eq!(state.hat, -1);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn last_declared_value_field_is_never_consulted() {
    // Hat declared last: the report says 3, the snapshot keeps -1.
    let desc = FakeDescriptor::gamepad();
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, _log) = decoder_with_log();

    let report = desc.report(&[(USAGE_HAT, 3)], &[]);
    decoder.decode(&desc, &caps, &report).expect("decode");
    assert_eq!(decoder.state().hat, -1);

    // Same fields with the hat declared first: now it decodes, and the
    // new last field (Rz) becomes the unread one.
    let mut desc = FakeDescriptor::gamepad();
    desc.values.rotate_right(1);
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, _log) = decoder_with_log();

    let report = desc.report(&[(USAGE_HAT, 3), (USAGE_RZ, 66)], &[]);
    decoder.decode(&desc, &caps, &report).expect("decode");
    assert_eq!(decoder.state().hat, 3);
    assert_eq!(decoder.state().right_z, 0);
}

#[test]
fn button_flags_follow_the_active_usage_list() {
    let desc = FakeDescriptor::gamepad();
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, _log) = decoder_with_log();

    let report = desc.report(&[], &[5]);
    decoder.decode(&desc, &caps, &report).expect("decode");
    assert!(decoder.state().buttons[4]);
    assert_eq!(decoder.state().buttons.iter().filter(|&&b| b).count(), 1);

    // Flags are fully re-derived: 5 released, 2 pressed.
    let report = desc.report(&[], &[2]);
    decoder.decode(&desc, &caps, &report).expect("decode");
    assert!(decoder.state().buttons[1]);
    assert!(!decoder.state().buttons[4]);

    // No active usages: everything false.
    let report = desc.report(&[], &[]);
    decoder.decode(&desc, &caps, &report).expect("decode");
    assert!(decoder.state().buttons.iter().all(|&b| !b));
}

#[test]
fn only_the_first_active_usage_in_a_range_is_recorded() {
    let desc = FakeDescriptor::gamepad();
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, _log) = decoder_with_log();

    let report = desc.report(&[], &[5, 7]);
    decoder.decode(&desc, &caps, &report).expect("decode");
    assert!(decoder.state().buttons[4]);
    assert!(!decoder.state().buttons[6]);
}

#[test]
fn decoding_the_same_report_twice_is_idempotent() {
    let desc = FakeDescriptor::gamepad();
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, log) = decoder_with_log();

    let report = desc.report(&[(USAGE_X, 123), (USAGE_Y, -45)], &[3]);
    decoder.decode(&desc, &caps, &report).expect("first decode");
    let first = *decoder.state();
    decoder.decode(&desc, &caps, &report).expect("second decode");

    assert_eq!(*decoder.state(), first);
    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0], log[1]);
}

#[test]
fn malformed_size_report_leaves_state_untouched() {
    let desc = FakeDescriptor::gamepad();
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, log) = decoder_with_log();

    let good = desc.report(&[(USAGE_X, 77)], &[1]);
    decoder.decode(&desc, &caps, &good).expect("decode");
    let before = *decoder.state();

    let short = vec![0u8; desc.input_report_len() - 1];
    let err = decoder.decode(&desc, &caps, &short).unwrap_err();
    assert!(matches!(err, Error::MalformedReport));
    assert_eq!(*decoder.state(), before);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn capability_query_failure_skips_the_decode() {
    let mut desc = FakeDescriptor::gamepad();
    desc.fail_caps = true;

    let err = inspect(&desc).unwrap_err();
    assert!(matches!(err, Error::DescriptorUnavailable));
}

#[test]
fn failed_field_extraction_keeps_the_prior_value() {
    let mut desc = FakeDescriptor::gamepad();
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, log) = decoder_with_log();

    let report = desc.report(&[(USAGE_X, 100)], &[]);
    decoder.decode(&desc, &caps, &report).expect("decode");
    assert_eq!(decoder.state().left_x, 100);

    // X stops extracting; the rest of the state still updates.
    desc.fail_usages.insert(USAGE_X);
    let report = desc.report(&[(USAGE_X, 999), (USAGE_Y, 50)], &[]);
    decoder.decode(&desc, &caps, &report).expect("decode");

    assert_eq!(decoder.state().left_x, 100);
    assert_eq!(decoder.state().left_y, 50);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn out_of_range_button_usages_are_ignored() {
    let mut desc = FakeDescriptor::gamepad();
    desc.buttons = vec![RawButtonCap {
        usage_page: BUTTON_PAGE,
        usage_min: 1,
        usage_max: 16,
    }];
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, _log) = decoder_with_log();

    // Usage 16 has no slot in the fixed button array.
    let report = desc.report(&[], &[16]);
    decoder.decode(&desc, &caps, &report).expect("decode");
    assert!(decoder.state().buttons.iter().all(|&b| !b));
}

#[test]
fn end_to_end_gamepad_report() {
    let desc = FakeDescriptor::gamepad();
    let caps = inspect(&desc).expect("inspect");
    let (mut decoder, log) = decoder_with_log();

    let report = desc.report(&[(USAGE_X, 100), (USAGE_Y, 200), (USAGE_HAT, 3)], &[5]);
    decoder.decode(&desc, &caps, &report).expect("decode");

    let state = decoder.state();
    assert_eq!(state.left_x, 100);
    assert_eq!(state.left_y, 200);
    assert!(state.buttons[4]);
    assert_eq!(state.buttons.iter().filter(|&&b| b).count(), 1);
    // The hat is the last declared value field, so it is never consulted.
    assert_eq!(state.hat, -1);
    assert_eq!(log.borrow().len(), 1);
}
