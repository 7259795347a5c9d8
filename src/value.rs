//! Non-owning references to functions and global variables.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::ffi::{self, RawValue};
use crate::module::Module;
use crate::output;

/// A function or global variable inside a [`Module`].
///
/// The reference never owns the underlying object and has no disposal
/// surface; it borrows the module it came from, so the module cannot be
/// closed or dropped while any `ValueRef` into it is alive.
#[derive(Clone, Copy)]
pub struct ValueRef<'m> {
    raw: NonNull<RawValue>,
    _module: PhantomData<&'m Module>,
}

impl<'m> ValueRef<'m> {
    pub(crate) fn from_raw(raw: NonNull<RawValue>) -> ValueRef<'m> {
        ValueRef {
            raw,
            _module: PhantomData,
        }
    }

    /// The symbol's name, copied out of toolkit-owned storage.
    pub fn name(&self) -> String {
        output::read_string(|out| unsafe { ffi::IRB_GetValueName(self.raw.as_ptr(), out) })
    }
}

impl fmt::Display for ValueRef<'_> {
    /// Renders the value the way the toolkit prints it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text =
            output::take_string(|out| unsafe { ffi::IRB_PrintValueToString(self.raw.as_ptr(), out) });
        f.write_str(&text)
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueRef({:p})", self.raw.as_ptr())
    }
}

impl PartialEq for ValueRef<'_> {
    /// Identity comparison by underlying address.
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ValueRef<'_> {}

impl Hash for ValueRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.raw.as_ptr() as usize).hash(state);
    }
}
