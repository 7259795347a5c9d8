//! Ownership wrapper for opaque toolkit pointers.
//!
//! Every toolkit object the crate holds on to goes through [`RawHandle`]:
//! it records whether the wrapper owns the native object, guarantees the
//! disposal routine runs at most once, and turns any use of a released
//! handle into a panic instead of a dangling native call.

use std::cell::Cell;
use std::fmt;
use std::ptr::NonNull;

/// An opaque toolkit object a [`RawHandle`] can manage.
///
/// # Safety
///
/// `dispose` must release exactly the object behind `ptr` through the
/// toolkit's own destructor, and must be safe to call exactly once with a
/// pointer previously returned by the toolkit.
pub(crate) unsafe trait Opaque {
    /// Role name used in lifetime-violation panics.
    const ROLE: &'static str;

    unsafe fn dispose(ptr: NonNull<Self>);
}

enum State<T> {
    Live(NonNull<T>),
    Disposed,
    Detached,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for State<T> {}

/// Owns-or-borrows wrapper around a non-null toolkit pointer.
///
/// Owned handles run `T::dispose` exactly once, on [`RawHandle::close`] or
/// on drop, whichever comes first. Borrowed handles never dispose. Either
/// way the pointer is cleared on release, and later access panics with the
/// handle's role and state.
pub(crate) struct RawHandle<T: Opaque> {
    state: Cell<State<T>>,
    owns: bool,
}

impl<T: Opaque> RawHandle<T> {
    /// Wraps a pointer this handle is responsible for disposing. Null yields
    /// `None`, never a dead handle.
    pub(crate) fn owned(ptr: *mut T) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| RawHandle {
            state: Cell::new(State::Live(ptr)),
            owns: true,
        })
    }

    /// Wraps a pointer whose object the toolkit retains ownership of.
    pub(crate) fn borrowed(ptr: *mut T) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| RawHandle {
            state: Cell::new(State::Live(ptr)),
            owns: false,
        })
    }

    /// Current pointer. Panics if the handle was already released.
    pub(crate) fn get(&self) -> NonNull<T> {
        match self.state.get() {
            State::Live(ptr) => ptr,
            State::Disposed => lifetime_violation(T::ROLE, "disposed"),
            State::Detached => lifetime_violation(T::ROLE, "detached"),
        }
    }

    pub(crate) fn as_ptr(&self) -> *mut T {
        self.get().as_ptr()
    }

    pub(crate) fn is_live(&self) -> bool {
        matches!(self.state.get(), State::Live(_))
    }

    /// Releases the native object. Idempotent; borrowed handles only forget
    /// their pointer.
    pub(crate) fn close(&self) {
        if let State::Live(ptr) = self.state.get() {
            self.state.set(State::Disposed);
            if self.owns {
                unsafe { T::dispose(ptr) };
            }
        }
    }

    /// Forgets the pointer without running the destructor; used after the
    /// native side has taken ownership of the object.
    pub(crate) fn detach(&self) {
        if self.is_live() {
            self.state.set(State::Detached);
        }
    }
}

impl<T: Opaque> Drop for RawHandle<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: Opaque> PartialEq for RawHandle<T> {
    /// Identity comparison by underlying address; released handles compare
    /// unequal to everything.
    fn eq(&self, other: &Self) -> bool {
        match (self.state.get(), other.state.get()) {
            (State::Live(a), State::Live(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Opaque> fmt::Debug for RawHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.get() {
            State::Live(ptr) => write!(f, "{} handle at {:p}", T::ROLE, ptr.as_ptr()),
            State::Disposed => write!(f, "{} handle (disposed)", T::ROLE),
            State::Detached => write!(f, "{} handle (detached)", T::ROLE),
        }
    }
}

#[cold]
fn lifetime_violation(role: &str, state: &str) -> ! {
    panic!("use-after-free: {role} handle is already {state}");
}
