//! Central error types for graphics2d.
//!
//! Every fallible operation returns [`G2dResult`]. Native failures keep the
//! status code reported by the engine so callers can still match on it.

use thiserror::Error;

/// Main error type for graphics2d operations.
#[derive(Error, Debug)]
pub enum G2dError {
    /// A native engine call failed
    #[error("{context} failed (0x{code:08X})")]
    Native { context: String, code: u32 },

    /// Drawing, text-layout or image-codec engine could not be constructed
    #[error("Engine initialization failed: {0}")]
    EngineInit(String),

    /// Engine or drawing surface is missing
    #[error("Not initialized: {0}")]
    NotInitialized(&'static str),

    /// The surface-loss callback declined the rebuild
    #[error("Surface refresh declined by caller")]
    RefreshDeclined,

    /// Text was supplied without a text format
    #[error("Text requires a text format")]
    MissingTextFormat,

    /// Output buffer too small; `required` includes the NUL terminator
    #[error("Insufficient buffer: {required} elements required")]
    InsufficientBuffer { required: u32 },

    /// Embedded resource lookup failed
    #[error("Resource not found: {name} ({kind})")]
    ResourceNotFound { name: String, kind: String },

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// Reading a configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl G2dError {
    /// Build a native error from a raw status code.
    pub fn native(context: impl Into<String>, code: i32) -> Self {
        G2dError::Native {
            context: context.into(),
            code: code as u32,
        }
    }

    /// Raw status code for native failures.
    pub fn code(&self) -> Option<i32> {
        match self {
            G2dError::Native { code, .. } => Some(*code as i32),
            _ => None,
        }
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for G2dError {
    fn from(err: windows::core::Error) -> Self {
        G2dError::native("native call", err.code().0)
    }
}

impl From<String> for G2dError {
    fn from(msg: String) -> Self {
        G2dError::Other(msg)
    }
}

impl From<&str> for G2dError {
    fn from(msg: &str) -> Self {
        G2dError::Other(msg.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// On Windows this keeps the native status code when wrapping a
/// `windows::core::Error`.
pub trait ResultExt<T> {
    /// Attach the name of the failing operation.
    fn context(self, msg: &str) -> G2dResult<T>;

    /// Attach context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> G2dResult<T>;
}

#[cfg(windows)]
impl<T> ResultExt<T> for windows::core::Result<T> {
    fn context(self, msg: &str) -> G2dResult<T> {
        self.map_err(|e| G2dError::native(msg, e.code().0))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> G2dResult<T> {
        self.map_err(|e| G2dError::native(f(), e.code().0))
    }
}

impl<T> ResultExt<T> for G2dResult<T> {
    fn context(self, msg: &str) -> G2dResult<T> {
        self.map_err(|e| match e {
            G2dError::Native { code, .. } => G2dError::Native {
                context: msg.to_string(),
                code,
            },
            other => G2dError::Other(format!("{}: {}", msg, other)),
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> G2dResult<T> {
        let msg = f();
        self.context(&msg)
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    /// Convert None to `NotInitialized` naming the missing piece.
    fn or_uninit(self, what: &'static str) -> G2dResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_uninit(self, what: &'static str) -> G2dResult<T> {
        self.ok_or(G2dError::NotInitialized(what))
    }
}

/// Type alias for Results using G2dError.
pub type G2dResult<T> = Result<T, G2dError>;
