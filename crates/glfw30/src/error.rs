use core::ffi::{c_char, c_int, CStr};
use std::{cell::RefCell, mem};

use glfw30_sys as sys;

use crate::WindowHint;

thread_local! {
    static LAST_ERROR: RefCell<Option<Error>> = const { RefCell::new(None) };
}

/// An error reported by GLFW through the error callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub desc: String,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, desc: impl Into<String>) -> Error {
        Error {
            code: kind as i32,
            desc: desc.into(),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::try_from(self.code).ok()
    }
}

impl core::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({:#x})", self.desc, self.code)
    }
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotInitialized = sys::GLFW_NOT_INITIALIZED,
    NoCurrentContext = sys::GLFW_NO_CURRENT_CONTEXT,
    InvalidEnum = sys::GLFW_INVALID_ENUM,
    InvalidValue = sys::GLFW_INVALID_VALUE,
    OutOfMemory = sys::GLFW_OUT_OF_MEMORY,
    ApiUnavailable = sys::GLFW_API_UNAVAILABLE,
    VersionUnavailable = sys::GLFW_VERSION_UNAVAILABLE,
    PlatformError = sys::GLFW_PLATFORM_ERROR,
    FormatUnavailable = sys::GLFW_FORMAT_UNAVAILABLE,
}

impl TryFrom<i32> for ErrorKind {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value >= sys::GLFW_NOT_INITIALIZED && value <= sys::GLFW_FORMAT_UNAVAILABLE {
            Ok(unsafe { mem::transmute::<i32, ErrorKind>(value) })
        } else {
            Err(value)
        }
    }
}

#[derive(Debug)]
pub enum InitError {
    Init(Error),
}

impl core::error::Error for InitError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            InitError::Init(err) => Some(err),
        }
    }
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InitError::Init(err) => write!(f, "glfwInit failed: {}", err),
        }
    }
}

#[derive(Debug)]
pub enum TryInitError {
    InitError(InitError),
    WouldBlock,
}

impl From<InitError> for TryInitError {
    fn from(value: InitError) -> Self {
        TryInitError::InitError(value)
    }
}

impl core::fmt::Display for TryInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TryInitError::InitError(err) => write!(f, "{}", err),
            TryInitError::WouldBlock => f.write_str("GLFW is already initialized"),
        }
    }
}

impl core::error::Error for TryInitError {}

#[derive(Debug)]
pub enum CreateWindowError<'a> {
    Hint(&'a WindowHint, Error),
    CreateWindow(Error),
}

impl core::fmt::Display for CreateWindowError<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CreateWindowError::Hint(hint, err) => write!(f, "invalid hint {:?}: {}", hint, err),
            CreateWindowError::CreateWindow(err) => write!(f, "glfwCreateWindow failed: {}", err),
        }
    }
}

impl core::error::Error for CreateWindowError<'_> {}

pub(crate) fn unknown_error(function: &str) -> Error {
    Error {
        code: -1,
        desc: format!("{} failed without reporting an error", function),
    }
}

/// Removes and returns the error recorded on this thread, if any.
pub(crate) fn take_error() -> Option<Error> {
    LAST_ERROR.with(|slot| slot.borrow_mut().take())
}

pub(crate) fn clear_error() {
    let _ = take_error();
}

/// Runs a native call and fails with the first error GLFW reported while it ran.
///
/// An error already pending on this thread, such as one raised earlier in the
/// event pump whose handler is making this call, is set aside for the call and
/// then restored.
pub(crate) fn checked<T>(call: impl FnOnce() -> T) -> Result<T, Error> {
    let pending = take_error();
    let value = call();
    let result = match take_error() {
        Some(err) => Err(err),
        None => Ok(value),
    };
    if pending.is_some() {
        LAST_ERROR.with(|slot| *slot.borrow_mut() = pending);
    }
    result
}

/// Copies the native description, which is only valid until this returns.
pub(crate) unsafe extern "C" fn error_callback(code: c_int, desc: *const c_char) {
    let desc = if desc.is_null() {
        String::new()
    } else {
        CStr::from_ptr(desc).to_string_lossy().into_owned()
    };
    log::debug!("GLFW error {:#x}: {}", code, desc);
    LAST_ERROR.with(|slot| {
        // Only the first error of a call is kept.
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(Error { code, desc });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_callback_records_first_error() {
        clear_error();
        unsafe {
            error_callback(sys::GLFW_INVALID_ENUM, c"Invalid window hint".as_ptr());
            error_callback(sys::GLFW_PLATFORM_ERROR, c"Follow-up".as_ptr());
        }
        let err = take_error().expect("error recorded");
        assert_eq!(Some(ErrorKind::InvalidEnum), err.kind());
        assert_eq!("Invalid window hint", err.desc);
        assert_eq!(None, take_error());
    }

    #[test]
    fn error_callback_accepts_null_description() {
        clear_error();
        unsafe { error_callback(sys::GLFW_OUT_OF_MEMORY, core::ptr::null()) };
        let err = take_error().expect("error recorded");
        assert_eq!(Some(ErrorKind::OutOfMemory), err.kind());
        assert!(err.desc.is_empty());
    }

    #[test]
    fn errors_are_thread_local() {
        clear_error();
        std::thread::spawn(|| unsafe {
            error_callback(sys::GLFW_NO_CURRENT_CONTEXT, c"No context".as_ptr());
        })
        .join()
        .unwrap();
        assert_eq!(None, take_error());
    }

    #[test]
    fn checked_reports_only_its_own_errors() {
        clear_error();
        assert_eq!(Ok(7), checked(|| 7));

        let result = checked(|| unsafe {
            error_callback(sys::GLFW_INVALID_VALUE, c"Invalid value".as_ptr());
        });
        assert_eq!(Some(ErrorKind::InvalidValue), result.unwrap_err().kind());
        assert_eq!(None, take_error());
    }

    #[test]
    fn checked_keeps_an_outer_pending_error() {
        clear_error();
        // An outer call, such as an event pump, has already recorded an error when
        // the handler makes calls of its own.
        let outer = checked(|| unsafe {
            error_callback(sys::GLFW_PLATFORM_ERROR, c"X11: lost".as_ptr());
            assert_eq!(Ok(true), checked(|| true));
            let inner = checked(|| error_callback(sys::GLFW_INVALID_ENUM, c"Invalid enum".as_ptr()));
            assert_eq!(Some(ErrorKind::InvalidEnum), inner.unwrap_err().kind());
        });
        let err = outer.unwrap_err();
        assert_eq!(Some(ErrorKind::PlatformError), err.kind());
        assert_eq!("X11: lost", err.desc);
        assert_eq!(None, take_error());
    }

    #[test]
    fn error_kind_from_code() {
        assert_eq!(Ok(ErrorKind::NotInitialized), ErrorKind::try_from(0x00070001));
        assert_eq!(Ok(ErrorKind::FormatUnavailable), ErrorKind::try_from(0x00070009));
        assert_eq!(Err(0x0007000A), ErrorKind::try_from(0x0007000A));
        assert_eq!(Err(-1), ErrorKind::try_from(-1));
    }

    #[test]
    fn display_includes_code() {
        let err = Error::new(ErrorKind::InvalidValue, "Invalid gamma value");
        assert_eq!("Invalid gamma value (0x70004)", err.to_string());
        assert_eq!(None, unknown_error("glfwInit").kind());
    }
}
