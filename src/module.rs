//! Module handles: parsing, inspection, linking, disposal.

use std::ffi::CString;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::context::Context;
use crate::error::{BindingResult, Error, LinkFailure};
use crate::ffi::{self, RawGlobalsCursor, RawModule};
use crate::handle::{Opaque, RawHandle};
use crate::output;
use crate::value::ValueRef;

unsafe impl Opaque for RawModule {
    const ROLE: &'static str = "module";

    unsafe fn dispose(ptr: NonNull<Self>) {
        unsafe { ffi::IRB_DisposeModule(ptr.as_ptr()) };
    }
}

unsafe impl Opaque for RawGlobalsCursor {
    const ROLE: &'static str = "globals cursor";

    unsafe fn dispose(ptr: NonNull<Self>) {
        unsafe { ffi::IRB_DisposeGlobalsIter(ptr.as_ptr()) };
    }
}

/// Parses textual IR in `context` and returns an owning module handle.
///
/// The text is copied into a NUL-terminated buffer that stays alive for the
/// whole native call. On a parse failure the toolkit may still hand back a
/// partially constructed module object; it is disposed before the error is
/// surfaced.
pub fn parse_assembly(context: &Context, ir: &str) -> BindingResult<Module> {
    let ir = CString::new(ir)?;
    let mut parsed: *mut RawModule = ptr::null_mut();
    let status = output::check(|error_out| {
        parsed = unsafe { ffi::IRB_ParseAssembly(context.as_ptr(), ir.as_ptr(), error_out) };
    });
    let parsed = RawHandle::owned(parsed);
    if let Err(message) = status {
        // `parsed` drops here, releasing the partial module if there is one.
        return Err(Error::Parse(message));
    }
    match parsed {
        Some(raw) => Ok(Module { raw }),
        None => Err(Error::Native(
            "parser returned neither a module nor an error".to_owned(),
        )),
    }
}

/// An owning handle to a parsed compilation unit.
///
/// Dropping the module disposes the native object; [`Module::close`]
/// disposes it early. Operations on a closed module panic, since a dead
/// handle reached from live code is a lifetime bug rather than recoverable
/// input.
#[derive(Debug, PartialEq)]
pub struct Module {
    raw: RawHandle<RawModule>,
}

impl Module {
    fn as_ptr(&self) -> *mut RawModule {
        self.raw.as_ptr()
    }

    /// Looks up a function by name.
    pub fn get_function(&self, name: &str) -> BindingResult<ValueRef<'_>> {
        let cname = CString::new(name)?;
        let value = unsafe { ffi::IRB_GetNamedFunction(self.as_ptr(), cname.as_ptr()) };
        match NonNull::new(value) {
            Some(value) => Ok(ValueRef::from_raw(value)),
            None => Err(Error::SymbolNotFound(name.to_owned())),
        }
    }

    /// Looks up a global variable by name.
    pub fn get_global_variable(&self, name: &str) -> BindingResult<ValueRef<'_>> {
        let cname = CString::new(name)?;
        let value = unsafe { ffi::IRB_GetNamedGlobalVariable(self.as_ptr(), cname.as_ptr()) };
        match NonNull::new(value) {
            Some(value) => Ok(ValueRef::from_raw(value)),
            None => Err(Error::SymbolNotFound(name.to_owned())),
        }
    }

    /// Runs the toolkit's verifier; the diagnostic text comes back verbatim
    /// on failure.
    pub fn verify(&self) -> BindingResult<()> {
        output::check(|error_out| unsafe { ffi::IRB_VerifyModule(self.as_ptr(), error_out) })
            .map_err(Error::Verify)
    }

    /// The module's data-layout string. Empty when unset.
    pub fn data_layout(&self) -> String {
        output::read_string(|out| unsafe { ffi::IRB_GetDataLayout(self.as_ptr(), out) })
    }

    /// Replaces the data-layout string. The encoded buffer stays alive for
    /// the whole call; the toolkit copies it.
    pub fn set_data_layout(&mut self, layout: &str) -> BindingResult<()> {
        let layout = CString::new(layout)?;
        unsafe { ffi::IRB_SetDataLayout(self.as_ptr(), layout.as_ptr()) };
        Ok(())
    }

    /// The module's target triple string. Empty when unset.
    pub fn triple(&self) -> String {
        output::read_string(|out| unsafe { ffi::IRB_GetTarget(self.as_ptr(), out) })
    }

    /// Replaces the target triple string.
    pub fn set_triple(&mut self, triple: &str) -> BindingResult<()> {
        let triple = CString::new(triple)?;
        unsafe { ffi::IRB_SetTarget(self.as_ptr(), triple.as_ptr()) };
        Ok(())
    }

    /// Merges `src` into `self`, consuming it on success.
    ///
    /// On failure the linker makes no changes and `src` comes back inside
    /// the error, valid and undisturbed. Consumption is by move, so using a
    /// linked-away module is rejected at compile time:
    ///
    /// ```compile_fail
    /// # use irbridge::{parse_assembly, Context};
    /// let context = Context::global();
    /// let mut dst = parse_assembly(&context, "@a = global i32 0").unwrap();
    /// let src = parse_assembly(&context, "@b = global i32 1").unwrap();
    /// dst.link_in(src).unwrap();
    /// src.verify().unwrap();
    /// ```
    pub fn link_in(&mut self, src: Module) -> Result<(), LinkFailure> {
        let status = output::check(|error_out| unsafe {
            ffi::IRB_LinkModules(self.as_ptr(), src.as_ptr(), false, error_out)
        });
        match status {
            Ok(()) => {
                // The native linker took ownership of the source object.
                src.raw.detach();
                Ok(())
            }
            Err(message) => Err(LinkFailure {
                message,
                module: src,
            }),
        }
    }

    /// Merges a copy of `src` into `self`; `src` stays fully usable and
    /// independent.
    pub fn link_in_preserved(&mut self, src: &Module) -> BindingResult<()> {
        output::check(|error_out| unsafe {
            ffi::IRB_LinkModules(self.as_ptr(), src.as_ptr(), true, error_out)
        })
        .map_err(Error::Link)
    }

    /// A fresh single-pass cursor over the module's global variables.
    ///
    /// Each call creates an independent native cursor; requesting the
    /// sequence again starts over rather than resuming the previous one.
    /// The cursor borrows the module, so disposing the module while a
    /// cursor is live is rejected at compile time:
    ///
    /// ```compile_fail
    /// # use irbridge::{parse_assembly, Context};
    /// let context = Context::global();
    /// let mut module = parse_assembly(&context, "@g = global i32 0").unwrap();
    /// let mut globals = module.global_variables();
    /// module.close();
    /// globals.next();
    /// ```
    pub fn global_variables(&self) -> Globals<'_> {
        let cursor = unsafe { ffi::IRB_ModuleGlobalsIter(self.as_ptr()) };
        let Some(cursor) = RawHandle::owned(cursor) else {
            panic!("toolkit returned a null globals cursor");
        };
        Globals {
            cursor,
            exhausted: false,
            _module: PhantomData,
        }
    }

    /// Disposes the native module now instead of at drop. Idempotent; any
    /// later operation on this handle panics.
    pub fn close(&mut self) {
        self.raw.close();
    }
}

impl fmt::Display for Module {
    /// Renders the module's full textual IR.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text =
            output::take_string(|out| unsafe { ffi::IRB_PrintModuleToString(self.as_ptr(), out) });
        f.write_str(&text)
    }
}

/// Lazy single-pass iterator over a module's global variables.
///
/// Owns a native cursor that is released when the iterator is dropped,
/// whether it ran to exhaustion or was abandoned early. The borrow of the
/// module keeps it alive for the cursor's whole lifetime.
pub struct Globals<'m> {
    cursor: RawHandle<RawGlobalsCursor>,
    exhausted: bool,
    _module: PhantomData<&'m Module>,
}

impl<'m> Iterator for Globals<'m> {
    type Item = ValueRef<'m>;

    fn next(&mut self) -> Option<ValueRef<'m>> {
        if self.exhausted {
            return None;
        }
        let value = unsafe { ffi::IRB_GlobalsIterNext(self.cursor.as_ptr()) };
        match NonNull::new(value) {
            Some(value) => Some(ValueRef::from_raw(value)),
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Globals<'_> {}

impl fmt::Debug for Globals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Globals")
            .field("cursor", &self.cursor)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}
