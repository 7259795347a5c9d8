//! Scoped wrappers for the toolkit's out-parameter message protocol.
//!
//! Three call shapes exist at the boundary:
//! - error channel: the call signals failure only by populating an owned
//!   `char**` slot (parse, verify, link),
//! - owned result channel: the slot always receives the rendered text and
//!   the caller must free it (module/value printing),
//! - borrowed result channel: the slot receives a pointer into storage the
//!   toolkit retains (data layout, triple, value name).
//!
//! Every such call goes through one of the helpers below; no call site
//! touches the raw pattern directly, and owned buffers are released on every
//! exit path.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

use crate::ffi;

/// A `char**` slot whose buffer, once populated, this wrapper owns and must
/// release through the toolkit's message destructor.
pub(crate) struct OutputBuffer {
    slot: *mut c_char,
}

impl OutputBuffer {
    pub(crate) fn new() -> Self {
        OutputBuffer {
            slot: ptr::null_mut(),
        }
    }

    /// The slot pointer handed to the native call.
    pub(crate) fn slot(&mut self) -> *mut *mut c_char {
        &mut self.slot
    }

    /// Copies the buffer contents out, if the call populated the slot.
    pub(crate) fn message(&self) -> Option<String> {
        if self.slot.is_null() {
            return None;
        }
        let text = unsafe { CStr::from_ptr(self.slot) };
        Some(text.to_string_lossy().into_owned())
    }
}

impl Drop for OutputBuffer {
    fn drop(&mut self) {
        if !self.slot.is_null() {
            unsafe { ffi::IRB_DisposeMessage(self.slot) };
            self.slot = ptr::null_mut();
        }
    }
}

/// Error-channel call shape: a populated, non-empty slot is the failure
/// diagnostic; anything else is success. The buffer is released either way.
pub(crate) fn check(call: impl FnOnce(*mut *mut c_char)) -> Result<(), String> {
    let mut out = OutputBuffer::new();
    call(out.slot());
    match out.message() {
        Some(message) if !message.is_empty() => Err(message),
        _ => Ok(()),
    }
}

/// Owned result-channel shape: the slot carries the call's result text,
/// which is copied out before the buffer is released.
pub(crate) fn take_string(call: impl FnOnce(*mut *mut c_char)) -> String {
    let mut out = OutputBuffer::new();
    call(out.slot());
    out.message().unwrap_or_default()
}

/// Borrowed result-channel shape: the buffer stays owned by the toolkit and
/// is copied before any later native call could invalidate it. Never
/// released.
pub(crate) fn read_string(call: impl FnOnce(*mut *const c_char)) -> String {
    let mut slot: *const c_char = ptr::null();
    call(&mut slot);
    if slot.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(slot) }.to_string_lossy().into_owned()
}
