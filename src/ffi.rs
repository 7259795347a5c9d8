//! Raw declarations for the native toolkit shim (`libirbridge`).
//!
//! Everything here mirrors the shim's C ABI one-to-one: opaque object types,
//! constructors returning raw pointers (null on failure), destructors that
//! must be called at most once, and `char**` message slots. Ownership of each
//! out-parameter buffer is call-specific and noted per declaration; the safe
//! wrappers in [`crate::output`] enforce it.

#![allow(non_snake_case)]

use std::os::raw::c_char;

/// Opaque toolkit context from the shim.
#[repr(C)]
pub(crate) struct RawContext {
    _opaque: [u8; 0],
}

/// Opaque module object from the shim.
#[repr(C)]
pub(crate) struct RawModule {
    _opaque: [u8; 0],
}

/// Opaque value object (function or global variable) from the shim.
#[repr(C)]
pub(crate) struct RawValue {
    _opaque: [u8; 0],
}

/// Opaque cursor over a module's global-variable list.
#[repr(C)]
pub(crate) struct RawGlobalsCursor {
    _opaque: [u8; 0],
}

unsafe extern "C" {
    /// The process-wide default context. Never null, never torn down.
    pub(crate) fn IRB_GetGlobalContext() -> *mut RawContext;

    /// Disposes a context created outside the process-wide default.
    pub(crate) fn IRB_ContextDispose(context: *mut RawContext);

    /// Parses textual IR. `ir` must be NUL-terminated and stay valid for the
    /// whole call. On failure `error_out` receives an owned message, and any
    /// module returned alongside it must still be disposed by the caller.
    pub(crate) fn IRB_ParseAssembly(
        context: *mut RawContext,
        ir: *const c_char,
        error_out: *mut *mut c_char,
    ) -> *mut RawModule;

    pub(crate) fn IRB_DisposeModule(module: *mut RawModule);

    /// Renders the module; `out` always receives an owned buffer.
    pub(crate) fn IRB_PrintModuleToString(module: *mut RawModule, out: *mut *mut c_char);

    /// Null when no function with that name exists.
    pub(crate) fn IRB_GetNamedFunction(
        module: *mut RawModule,
        name: *const c_char,
    ) -> *mut RawValue;

    /// Null when no global variable with that name exists.
    pub(crate) fn IRB_GetNamedGlobalVariable(
        module: *mut RawModule,
        name: *const c_char,
    ) -> *mut RawValue;

    /// Populates `error_out` (owned) with the verifier diagnostic on failure.
    pub(crate) fn IRB_VerifyModule(module: *mut RawModule, error_out: *mut *mut c_char);

    /// `out` receives a buffer owned by the module; copy it, never free it.
    pub(crate) fn IRB_GetDataLayout(module: *mut RawModule, out: *mut *const c_char);

    /// The shim copies `layout` before returning.
    pub(crate) fn IRB_SetDataLayout(module: *mut RawModule, layout: *const c_char);

    /// `out` receives a buffer owned by the module; copy it, never free it.
    pub(crate) fn IRB_GetTarget(module: *mut RawModule, out: *mut *const c_char);

    /// The shim copies `triple` before returning.
    pub(crate) fn IRB_SetTarget(module: *mut RawModule, triple: *const c_char);

    /// Merges `src` into `dst`. With `preserve` false the toolkit consumes
    /// `src` on success; on failure (`error_out` populated, owned) `src` is
    /// left untouched. With `preserve` true `src` is never consumed.
    pub(crate) fn IRB_LinkModules(
        dst: *mut RawModule,
        src: *mut RawModule,
        preserve: bool,
        error_out: *mut *mut c_char,
    );

    /// Fresh cursor positioned before the module's first global. Never null
    /// for a live module.
    pub(crate) fn IRB_ModuleGlobalsIter(module: *mut RawModule) -> *mut RawGlobalsCursor;

    /// Next global, or null once the cursor is exhausted.
    pub(crate) fn IRB_GlobalsIterNext(cursor: *mut RawGlobalsCursor) -> *mut RawValue;

    pub(crate) fn IRB_DisposeGlobalsIter(cursor: *mut RawGlobalsCursor);

    /// `out` receives a buffer owned by the value; copy it, never free it.
    pub(crate) fn IRB_GetValueName(value: *mut RawValue, out: *mut *const c_char);

    /// Renders the value; `out` always receives an owned buffer.
    pub(crate) fn IRB_PrintValueToString(value: *mut RawValue, out: *mut *mut c_char);

    /// Releases a buffer handed out through an owned out-parameter.
    pub(crate) fn IRB_DisposeMessage(message: *mut c_char);
}
