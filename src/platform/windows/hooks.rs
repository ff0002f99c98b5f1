//! Replacement bodies for the hooked host entry points.
//!
//! Nothing here may panic or surface an error to the host: every failure
//! path ends in calling the original entry point with its arguments intact.

use super::shell::CabinetResolver;
use crate::dispatcher::Dispatcher;
use crate::runtime::Runtime;
use quiet_nav_keybindings::{Key, KeyChord, KeyEvent, KeyPhase, Modifiers};
use std::sync::{Arc, OnceLock};
use windows::Win32::Foundation::{BOOL, HWND, TRUE};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, VIRTUAL_KEY, VK_CONTROL, VK_MENU, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    HACCEL, MSG, WM_KEYDOWN, WM_KEYUP, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

/// Raw ABI of `TranslateAcceleratorW`.
pub type TranslateAcceleratorFn = unsafe extern "system" fn(HWND, HACCEL, *const MSG) -> i32;

static TRANSLATE_ORIGINAL: OnceLock<TranslateAcceleratorFn> = OnceLock::new();
static DISPATCHER: OnceLock<Dispatcher<CabinetResolver>> = OnceLock::new();

/// Record the host's original `TranslateAcceleratorW`, as returned by the
/// loader when it installed [`translate_accelerator_hook`].
#[unsafe(no_mangle)]
pub extern "system" fn quiet_nav_bind_translate_original(original: TranslateAcceleratorFn) {
    if TRANSLATE_ORIGINAL.set(original).is_err() {
        log::warn!("TranslateAcceleratorW original already bound");
    }
}

/// Arm the key hook with the runtime's settings.
pub fn activate(runtime: &'static Runtime) {
    DISPATCHER.get_or_init(|| Dispatcher::new(CabinetResolver, Arc::clone(runtime.settings())));
}

/// Replacement for `MessageBeep`: report success, make no sound.
#[unsafe(no_mangle)]
pub extern "system" fn message_beep_hook(alert_type: u32) -> BOOL {
    if let Some(runtime) = Runtime::get() {
        runtime.suppressor().suppress(alert_type);
    }
    TRUE
}

/// Replacement for `TranslateAcceleratorW`.
///
/// # Safety
/// Called by the host with the same contract as `TranslateAcceleratorW`:
/// `msg` is null or points to a valid `MSG` for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn translate_accelerator_hook(
    hwnd: HWND,
    accel: HACCEL,
    msg: *const MSG,
) -> i32 {
    let call_original = || match TRANSLATE_ORIGINAL.get() {
        Some(original) => unsafe { original(hwnd, accel, msg) },
        None => 0,
    };

    let event = unsafe { msg.as_ref() }.and_then(key_event_from_msg);
    match (DISPATCHER.get(), event) {
        (Some(dispatcher), Some(event)) => dispatcher.intercept(hwnd, &event, 1, call_original),
        _ => call_original(),
    }
}

fn key_event_from_msg(msg: &MSG) -> Option<KeyEvent> {
    // Alt chords arrive as WM_SYS* messages
    let phase = match msg.message {
        WM_KEYDOWN | WM_SYSKEYDOWN => KeyPhase::Down,
        WM_KEYUP | WM_SYSKEYUP => KeyPhase::Up,
        _ => return None,
    };
    let modifiers = Modifiers {
        ctrl: key_held(VK_CONTROL),
        alt: key_held(VK_MENU),
        shift: key_held(VK_SHIFT),
    };
    Some(KeyEvent {
        phase,
        chord: KeyChord::new(Key::from_virtual_key(msg.wParam.0 as u16), modifiers),
    })
}

fn key_held(vk: VIRTUAL_KEY) -> bool {
    let state = unsafe { GetKeyState(i32::from(vk.0)) };
    (state as u16 & 0x8000) != 0
}
