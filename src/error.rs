//! Error types for the binding surface.
//!
//! Every native-boundary failure is classified at the foreign call into one
//! of these values; diagnostic text from the toolkit is carried verbatim.
//! Use of an already-released handle is not represented here: it is a
//! lifetime bug in the caller and panics instead (see `handle`).

use derive_more::Display;

use crate::module::Module;

pub type BindingResult<T> = Result<T, Error>;

#[derive(Debug, Display)]
pub enum Error {
    /// The toolkit rejected the textual IR.
    #[display("IR parsing error\n{_0}")]
    Parse(String),

    /// The toolkit's verifier found the module structurally invalid.
    #[display("module verification failed\n{_0}")]
    Verify(String),

    /// No function or global variable with the requested name.
    #[display("symbol not found: {_0}")]
    SymbolNotFound(String),

    /// The native linker refused to merge the modules.
    #[display("module linking failed: {_0}")]
    Link(String),

    /// A native call failed without a more specific classification.
    #[display("native toolkit error: {_0}")]
    Native(String),

    /// Caller-supplied text cannot cross the boundary as a C string.
    #[display("text cannot be passed to the toolkit: {_0}")]
    InvalidText(std::ffi::NulError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidText(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::ffi::NulError> for Error {
    fn from(error: std::ffi::NulError) -> Self {
        Error::InvalidText(error)
    }
}

/// A failed [`Module::link_in`](crate::Module::link_in).
///
/// The native linker made no changes, so the source module is handed back
/// valid and undisturbed instead of being dropped with the error.
#[derive(Debug, Display)]
#[display("module linking failed: {message}")]
pub struct LinkFailure {
    /// The linker's diagnostic text.
    pub message: String,
    /// The unconsumed source module.
    pub module: Module,
}

impl std::error::Error for LinkFailure {}
