//! The toolkit context.

use std::ptr::NonNull;

use crate::ffi::{self, RawContext};
use crate::handle::{Opaque, RawHandle};

unsafe impl Opaque for RawContext {
    const ROLE: &'static str = "context";

    unsafe fn dispose(ptr: NonNull<Self>) {
        unsafe { ffi::IRB_ContextDispose(ptr.as_ptr()) };
    }
}

/// The toolkit environment that owns otherwise-unscoped native allocations,
/// such as everything the parser creates.
///
/// This crate only exposes the process-wide default context: the toolkit
/// initializes it once and never tears it down, so [`Context::global`] hands
/// out non-owning handles to it. Constructing operations take the context
/// explicitly rather than reaching for it behind the caller's back.
#[derive(Debug)]
pub struct Context {
    raw: RawHandle<RawContext>,
}

impl Context {
    /// A non-owning handle to the process-wide default context.
    pub fn global() -> Context {
        let ptr = unsafe { ffi::IRB_GetGlobalContext() };
        match RawHandle::borrowed(ptr) {
            Some(raw) => Context { raw },
            None => panic!("toolkit returned a null global context"),
        }
    }

    pub(crate) fn as_ptr(&self) -> *mut RawContext {
        self.raw.as_ptr()
    }
}
