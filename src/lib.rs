//! Safe handle layer over the irbridge native IR toolkit.
//!
//! The toolkit exposes a C ABI built on three conventions this crate wraps:
//! - opaque object pointers that must be disposed exactly once, in an order
//!   that respects ownership (a cursor never outlives its module),
//! - failure signaled by populating a caller-supplied `char**` slot instead
//!   of a return code, with call-specific buffer ownership,
//! - strings handed out as pointers into toolkit-owned storage that must be
//!   copied before the next native call.
//!
//! Entry points: [`parse_assembly`] turns textual IR into an owning
//! [`Module`]; modules hand out borrowed [`ValueRef`]s and global-variable
//! cursors, can be verified, rendered, and linked into each other. All
//! native diagnostics surface through [`Error`] verbatim; use of a released
//! handle panics, since it denotes a violated lifetime invariant rather
//! than recoverable input.
//!
//! The toolkit is not documented as thread-safe for mutating operations, so
//! every handle type is deliberately `!Send` and `!Sync`.

mod context;
mod error;
mod ffi;
mod handle;
mod module;
mod output;
mod value;


pub use context::Context;
pub use error::{BindingResult, Error, LinkFailure};
pub use module::{Globals, Module, parse_assembly};
pub use value::ValueRef;
