//! Context management. Unlike most of the API, everything here may be called from
//! any thread, so render threads can drive a window's context while the main
//! thread pumps events.

use core::ffi::c_int;
use std::{
    ptr,
    sync::atomic::{AtomicBool, Ordering},
};

use glfw30_sys as sys;

use crate::{c_string, error::checked, window::context_lent_error, Error, WindowId};

/// The context of a [`Window`](crate::Window), borrowed for as long as the window lives.
///
/// A context may be current on only one thread at a time, so there is at most one
/// handle per window and it cannot be copied. Detach the context from the thread
/// that created the window before making it current on the render thread.
#[derive(Debug)]
pub struct Context<'w> {
    window_ptr: *mut sys::GLFWwindow,
    lent: &'w AtomicBool,
}

unsafe impl Send for Context<'_> {}

impl<'w> Context<'w> {
    /// Takes the window's context, failing if another handle holds it.
    pub(crate) fn lend(
        window_ptr: *mut sys::GLFWwindow,
        lent: &'w AtomicBool,
    ) -> Result<Context<'w>, Error> {
        lent.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| context_lent_error())?;
        Ok(Context { window_ptr, lent })
    }

    pub fn window_id(&self) -> WindowId {
        WindowId(self.window_ptr as usize)
    }

    #[doc(alias = "glfwMakeContextCurrent")]
    pub fn make_current(&self) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwMakeContextCurrent(self.window_ptr) })
    }

    #[doc(alias = "glfwSwapBuffers")]
    pub fn swap_buffers(&self) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwSwapBuffers(self.window_ptr) })
    }
}

impl Drop for Context<'_> {
    fn drop(&mut self) {
        self.lent.store(false, Ordering::Release);
    }
}

/// Leaves the calling thread without a current context.
#[doc(alias = "glfwMakeContextCurrent")]
pub fn detach_current() -> Result<(), Error> {
    checked(|| unsafe { sys::glfwMakeContextCurrent(ptr::null_mut()) })
}

/// The window whose context is current on the calling thread.
#[doc(alias = "glfwGetCurrentContext")]
pub fn current() -> Result<Option<WindowId>, Error> {
    let window_ptr = checked(|| unsafe { sys::glfwGetCurrentContext() })?;
    Ok((!window_ptr.is_null()).then(|| WindowId(window_ptr as usize)))
}

/// Number of screen updates to wait before swapping buffers of the current context.
#[doc(alias = "glfwSwapInterval")]
pub fn swap_interval(interval: i32) -> Result<(), Error> {
    checked(|| unsafe { sys::glfwSwapInterval(interval as c_int) })
}

/// Whether the current context supports the named API extension.
#[doc(alias = "glfwExtensionSupported")]
pub fn extension_supported(extension: &str) -> Result<bool, Error> {
    let extension = c_string(extension)?;
    checked(|| unsafe { sys::glfwExtensionSupported(extension.as_ptr()) == sys::GL_TRUE })
}

/// Address of a client API function for the current context; `None` if it is not
/// supported. The address is only valid for contexts with the same configuration.
#[doc(alias = "glfwGetProcAddress")]
pub fn get_proc_address(procname: &str) -> Result<sys::GLFWglproc, Error> {
    let procname = c_string(procname)?;
    checked(|| unsafe { sys::glfwGetProcAddress(procname.as_ptr()) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>() {}

    #[test]
    fn context_is_send() {
        assert_send::<Context<'static>>();
    }

    #[test]
    fn context_reports_its_window() {
        let lent = AtomicBool::new(false);
        let context = Context::lend(0x3000 as *mut sys::GLFWwindow, &lent).unwrap();
        assert_eq!(WindowId(0x3000), context.window_id());
    }

    #[test]
    fn one_context_handle_per_window() {
        let window_ptr = 0x3000 as *mut sys::GLFWwindow;
        let lent = AtomicBool::new(false);

        let context = Context::lend(window_ptr, &lent).unwrap();
        assert!(lent.load(Ordering::Acquire));
        let err = Context::lend(window_ptr, &lent).unwrap_err();
        assert_eq!(Some(crate::ErrorKind::InvalidValue), err.kind());

        std::thread::scope(|scope| {
            scope.spawn(move || drop(context));
        });
        assert!(!lent.load(Ordering::Acquire));
        assert!(Context::lend(window_ptr, &lent).is_ok());
    }
}
