//! Prints every decoded gamepad snapshot.
//!
//! Creates a message-only window, registers a [`DeviceSession`] against
//! it, and pumps `WM_INPUT` events forever. This is the whole collaborator
//! contract: the host owns the window and the message loop, the session
//! owns the decoding.
//!
//! [`DeviceSession`]: rawpad::backends::windows::DeviceSession

#[cfg(target_os = "windows")]
fn main() {
    use core::mem::MaybeUninit;
    use core::ptr::{null, null_mut};

    use rawpad::backends::windows::DeviceSession;
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        CreateWindowExW, DispatchMessageW, GetMessageW, TranslateMessage, HWND_MESSAGE, MSG,
        WM_INPUT,
    };

    let class: Vec<u16> = "STATIC".encode_utf16().chain([0]).collect();
    let title: Vec<u16> = "rawpad watch".encode_utf16().chain([0]).collect();

    let hwnd = unsafe {
        CreateWindowExW(
            0,
            class.as_ptr(),
            title.as_ptr(),
            0,
            0,
            0,
            0,
            0,
            HWND_MESSAGE,
            null_mut(),
            null_mut(),
            null(),
        )
    };
    assert!(!hwnd.is_null(), "create message window");

    let mut session = DeviceSession::new(hwnd, |state| {
        let pressed: Vec<usize> = state
            .buttons
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i + 1))
            .collect();
        println!(
            "L=({}, {}, {}) R=({}, {}, {}) hat={} buttons={:?}",
            state.left_x,
            state.left_y,
            state.left_z,
            state.right_x,
            state.right_y,
            state.right_z,
            state.hat,
            pressed
        );
    })
    .expect("register raw input");

    println!("watching for gamepad input (ctrl-c to quit)");

    unsafe {
        let mut msg = MaybeUninit::<MSG>::uninit();
        while GetMessageW(msg.as_mut_ptr(), null_mut(), 0, 0) > 0 {
            let msg = msg.assume_init();
            if msg.message == WM_INPUT {
                session.on_raw_input(msg.lParam);
            }
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("this demo uses Windows raw input; run it on Windows");
}
