/*
 * Error type shared by the painter, view tree and menu modules.
 *
 * Most UI misuse (an extra `restore`, inserting an item twice) is tolerated as a
 * logged no-op and never reaches this type. `PlatformError` is reserved for
 * construction-time validation and for native calls that report failure.
 */
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    InitializationFailed(String),
    InvalidHandle(String),
    InvalidParameter(String),
    OperationFailed(String),
    Win32(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::InitializationFailed(msg) => write!(f, "initialization failed: {msg}"),
            PlatformError::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            PlatformError::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            PlatformError::OperationFailed(msg) => write!(f, "operation failed: {msg}"),
            PlatformError::Win32(msg) => write!(f, "win32 error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::Win32(format!("{} (HRESULT {:#010x})", err.message(), err.code().0))
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
