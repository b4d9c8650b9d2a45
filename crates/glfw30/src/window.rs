use core::ffi::{c_int, c_void, CStr};
use std::{
    rc::Rc,
    sync::atomic::{AtomicBool, Ordering},
};

use glfw30_sys as sys;

use crate::{
    c_string, callbacks,
    error::{checked, Error, ErrorKind},
    Action, ClientApi, Context, ContextRobustness, CursorMode, Key, Monitor, MouseButton,
    OpenGlProfile, Terminate,
};

#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub(crate) usize);

impl WindowId {
    pub fn window_ptr(self) -> *const sys::GLFWwindow {
        self.0 as *const _
    }

    pub fn window_mut_ptr(self) -> *mut sys::GLFWwindow {
        self.0 as *mut _
    }
}

bitflags::bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct WindowState: u8 {
        const FOCUSED   = 1 << 0;
        const ICONIFIED = 1 << 1;
        const VISIBLE   = 1 << 2;
        const RESIZABLE = 1 << 3;
        const DECORATED = 1 << 4;
    }
}

impl WindowState {
    pub(crate) const PARAMS: [(WindowState, c_int); 5] = [
        (WindowState::FOCUSED, sys::GLFW_FOCUSED),
        (WindowState::ICONIFIED, sys::GLFW_ICONIFIED),
        (WindowState::VISIBLE, sys::GLFW_VISIBLE),
        (WindowState::RESIZABLE, sys::GLFW_RESIZABLE),
        (WindowState::DECORATED, sys::GLFW_DECORATED),
    ];
}

pub(crate) fn context_lent_error() -> Error {
    Error::new(
        ErrorKind::InvalidValue,
        "the window's context is held by a Context handle",
    )
}

fn unexpected_value(param: &str, value: c_int) -> Error {
    Error::new(
        ErrorKind::InvalidEnum,
        format!("unexpected value {:#x} for {}", value, param),
    )
}

/// A window and its OpenGL or OpenGL ES context.
#[derive(Debug)]
pub struct Window {
    pub(crate) window_ptr: *mut sys::GLFWwindow,
    /// Set while a [`Context`] for this window exists.
    pub(crate) context_lent: AtomicBool,
    pub(crate) _terminate: Rc<Terminate>,
}

impl Window {
    pub fn window_id(&self) -> WindowId {
        WindowId(self.window_ptr as usize)
    }

    /// A handle to this window's context that may be sent to a render thread.
    ///
    /// Only one handle exists at a time. While it does, the context belongs to the
    /// handle and [`Window::make_context_current`] and [`Window::swap_buffers`] fail.
    pub fn context(&self) -> Result<Context<'_>, Error> {
        Context::lend(self.window_ptr, &self.context_lent)
    }

    fn ensure_context_owned(&self) -> Result<(), Error> {
        if self.context_lent.load(Ordering::Acquire) {
            Err(context_lent_error())
        } else {
            Ok(())
        }
    }

    #[doc(alias = "glfwMakeContextCurrent")]
    pub fn make_context_current(&self) -> Result<(), Error> {
        self.ensure_context_owned()?;
        checked(|| unsafe { sys::glfwMakeContextCurrent(self.window_ptr) })
    }

    #[doc(alias = "glfwSwapBuffers")]
    pub fn swap_buffers(&self) -> Result<(), Error> {
        self.ensure_context_owned()?;
        checked(|| unsafe { sys::glfwSwapBuffers(self.window_ptr) })
    }

    #[doc(alias = "glfwWindowShouldClose")]
    pub fn should_close(&self) -> Result<bool, Error> {
        checked(|| unsafe { sys::glfwWindowShouldClose(self.window_ptr) == sys::GL_TRUE })
    }

    #[doc(alias = "glfwSetWindowShouldClose")]
    pub fn set_should_close(&self, value: bool) -> Result<(), Error> {
        let value = if value { sys::GL_TRUE } else { sys::GL_FALSE };
        checked(|| unsafe { sys::glfwSetWindowShouldClose(self.window_ptr, value) })
    }

    #[doc(alias = "glfwSetWindowTitle")]
    pub fn set_title(&self, title: &str) -> Result<(), Error> {
        let title = c_string(title)?;
        checked(|| unsafe { sys::glfwSetWindowTitle(self.window_ptr, title.as_ptr()) })
    }

    /// Position, in screen coordinates, of the upper-left corner of the client area.
    #[doc(alias = "glfwGetWindowPos")]
    pub fn get_pos(&self) -> Result<(i32, i32), Error> {
        let mut xpos = 0;
        let mut ypos = 0;
        checked(|| unsafe { sys::glfwGetWindowPos(self.window_ptr, &mut xpos, &mut ypos) })?;
        Ok((xpos, ypos))
    }

    #[doc(alias = "glfwSetWindowPos")]
    pub fn set_pos(&self, xpos: i32, ypos: i32) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwSetWindowPos(self.window_ptr, xpos, ypos) })
    }

    /// Size, in screen coordinates, of the client area.
    #[doc(alias = "glfwGetWindowSize")]
    pub fn get_size(&self) -> Result<(i32, i32), Error> {
        let mut width = 0;
        let mut height = 0;
        checked(|| unsafe { sys::glfwGetWindowSize(self.window_ptr, &mut width, &mut height) })?;
        Ok((width, height))
    }

    #[doc(alias = "glfwSetWindowSize")]
    pub fn set_size(&self, width: i32, height: i32) -> Result<(), Error> {
        crate::validate_size(width, height)?;
        checked(|| unsafe { sys::glfwSetWindowSize(self.window_ptr, width, height) })
    }

    #[doc(alias = "glfwIconifyWindow")]
    pub fn iconify(&self) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwIconifyWindow(self.window_ptr) })
    }

    #[doc(alias = "glfwRestoreWindow")]
    pub fn restore(&self) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwRestoreWindow(self.window_ptr) })
    }

    #[doc(alias = "glfwShowWindow")]
    pub fn show(&self) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwShowWindow(self.window_ptr) })
    }

    #[doc(alias = "glfwHideWindow")]
    pub fn hide(&self) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwHideWindow(self.window_ptr) })
    }

    /// The monitor used in fullscreen mode, or `None` for a windowed window.
    #[doc(alias = "glfwGetWindowMonitor")]
    pub fn get_monitor(&self) -> Result<Option<Monitor>, Error> {
        let monitor_ptr = checked(|| unsafe { sys::glfwGetWindowMonitor(self.window_ptr) })?;
        Ok((!monitor_ptr.is_null()).then(|| Monitor {
            monitor_ptr,
            _terminate: Rc::clone(&self._terminate),
        }))
    }

    #[doc(alias = "glfwGetWindowParam")]
    fn get_param(&self, param: c_int) -> Result<c_int, Error> {
        checked(|| unsafe { sys::glfwGetWindowParam(self.window_ptr, param) })
    }

    fn get_flag(&self, param: c_int) -> Result<bool, Error> {
        Ok(self.get_param(param)? == sys::GL_TRUE)
    }

    pub fn is_focused(&self) -> Result<bool, Error> {
        self.get_flag(sys::GLFW_FOCUSED)
    }

    pub fn is_iconified(&self) -> Result<bool, Error> {
        self.get_flag(sys::GLFW_ICONIFIED)
    }

    pub fn is_visible(&self) -> Result<bool, Error> {
        self.get_flag(sys::GLFW_VISIBLE)
    }

    pub fn is_resizable(&self) -> Result<bool, Error> {
        self.get_flag(sys::GLFW_RESIZABLE)
    }

    pub fn is_decorated(&self) -> Result<bool, Error> {
        self.get_flag(sys::GLFW_DECORATED)
    }

    /// All window parameters in one query.
    pub fn state(&self) -> Result<WindowState, Error> {
        let mut state = WindowState::empty();
        for (flag, param) in WindowState::PARAMS {
            state.set(flag, self.get_flag(param)?);
        }
        Ok(state)
    }

    pub fn client_api(&self) -> Result<ClientApi, Error> {
        let value = self.get_param(sys::GLFW_CLIENT_API)?;
        ClientApi::try_from(value).map_err(|value| unexpected_value("GLFW_CLIENT_API", value))
    }

    /// `(major, minor, revision)` of the context's client API.
    pub fn context_version(&self) -> Result<(i32, i32, i32), Error> {
        Ok((
            self.get_param(sys::GLFW_CONTEXT_VERSION_MAJOR)?,
            self.get_param(sys::GLFW_CONTEXT_VERSION_MINOR)?,
            self.get_param(sys::GLFW_CONTEXT_REVISION)?,
        ))
    }

    pub fn is_opengl_forward_compat(&self) -> Result<bool, Error> {
        self.get_flag(sys::GLFW_OPENGL_FORWARD_COMPAT)
    }

    pub fn is_opengl_debug_context(&self) -> Result<bool, Error> {
        self.get_flag(sys::GLFW_OPENGL_DEBUG_CONTEXT)
    }

    pub fn opengl_profile(&self) -> Result<OpenGlProfile, Error> {
        let value = self.get_param(sys::GLFW_OPENGL_PROFILE)?;
        OpenGlProfile::try_from(value).map_err(|value| unexpected_value("GLFW_OPENGL_PROFILE", value))
    }

    pub fn context_robustness(&self) -> Result<ContextRobustness, Error> {
        let value = self.get_param(sys::GLFW_CONTEXT_ROBUSTNESS)?;
        ContextRobustness::try_from(value)
            .map_err(|value| unexpected_value("GLFW_CONTEXT_ROBUSTNESS", value))
    }

    /// # Safety
    ///
    /// GLFW never dereferences the pointer; the caller is responsible for whatever
    /// it points to outliving its use.
    #[doc(alias = "glfwSetWindowUserPointer")]
    pub unsafe fn set_user_pointer(&self, pointer: *mut c_void) {
        sys::glfwSetWindowUserPointer(self.window_ptr, pointer);
    }

    #[doc(alias = "glfwGetWindowUserPointer")]
    pub fn user_pointer(&self) -> *mut c_void {
        unsafe { sys::glfwGetWindowUserPointer(self.window_ptr) }
    }

    fn get_input_mode(&self, mode: c_int) -> Result<c_int, Error> {
        checked(|| unsafe { sys::glfwGetInputMode(self.window_ptr, mode) })
    }

    fn set_input_mode(&self, mode: c_int, value: c_int) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwSetInputMode(self.window_ptr, mode, value) })
    }

    #[doc(alias = "glfwGetInputMode")]
    pub fn get_cursor_mode(&self) -> Result<CursorMode, Error> {
        let value = self.get_input_mode(sys::GLFW_CURSOR_MODE)?;
        CursorMode::try_from(value).map_err(|value| unexpected_value("GLFW_CURSOR_MODE", value))
    }

    #[doc(alias = "glfwSetInputMode")]
    pub fn set_cursor_mode(&self, mode: CursorMode) -> Result<(), Error> {
        self.set_input_mode(sys::GLFW_CURSOR_MODE, mode as c_int)
    }

    pub fn sticky_keys(&self) -> Result<bool, Error> {
        Ok(self.get_input_mode(sys::GLFW_STICKY_KEYS)? == sys::GL_TRUE)
    }

    /// With sticky keys a press is reported by [`Window::get_key`] at least once,
    /// even if the key was released before the query.
    pub fn set_sticky_keys(&self, value: bool) -> Result<(), Error> {
        let value = if value { sys::GL_TRUE } else { sys::GL_FALSE };
        self.set_input_mode(sys::GLFW_STICKY_KEYS, value)
    }

    pub fn sticky_mouse_buttons(&self) -> Result<bool, Error> {
        Ok(self.get_input_mode(sys::GLFW_STICKY_MOUSE_BUTTONS)? == sys::GL_TRUE)
    }

    pub fn set_sticky_mouse_buttons(&self, value: bool) -> Result<(), Error> {
        let value = if value { sys::GL_TRUE } else { sys::GL_FALSE };
        self.set_input_mode(sys::GLFW_STICKY_MOUSE_BUTTONS, value)
    }

    /// Last reported state of `key`; either `Press` or `Release`.
    #[doc(alias = "glfwGetKey")]
    pub fn get_key(&self, key: Key) -> Result<Action, Error> {
        let state = checked(|| unsafe { sys::glfwGetKey(self.window_ptr, key as c_int) })?;
        Action::try_from(state).map_err(|state| unexpected_value("key state", state))
    }

    #[doc(alias = "glfwGetMouseButton")]
    pub fn get_mouse_button(&self, button: MouseButton) -> Result<Action, Error> {
        let state =
            checked(|| unsafe { sys::glfwGetMouseButton(self.window_ptr, button as c_int) })?;
        Action::try_from(state).map_err(|state| unexpected_value("mouse button state", state))
    }

    /// Cursor position relative to the upper-left corner of the client area.
    #[doc(alias = "glfwGetCursorPos")]
    pub fn get_cursor_pos(&self) -> Result<(f64, f64), Error> {
        let mut xpos = 0.0;
        let mut ypos = 0.0;
        checked(|| unsafe { sys::glfwGetCursorPos(self.window_ptr, &mut xpos, &mut ypos) })?;
        Ok((xpos, ypos))
    }

    #[doc(alias = "glfwSetCursorPos")]
    pub fn set_cursor_pos(&self, xpos: f64, ypos: f64) -> Result<(), Error> {
        checked(|| unsafe { sys::glfwSetCursorPos(self.window_ptr, xpos, ypos) })
    }

    #[doc(alias = "glfwSetClipboardString")]
    pub fn set_clipboard_string(&self, string: &str) -> Result<(), Error> {
        let string = c_string(string)?;
        checked(|| unsafe { sys::glfwSetClipboardString(self.window_ptr, string.as_ptr()) })
    }

    /// `None` when the clipboard is empty or holds something other than text.
    #[doc(alias = "glfwGetClipboardString")]
    pub fn get_clipboard_string(&self) -> Result<Option<String>, Error> {
        let string_ptr = checked(|| unsafe { sys::glfwGetClipboardString(self.window_ptr) })?;
        if string_ptr.is_null() {
            Ok(None)
        } else {
            let string = unsafe { CStr::from_ptr(string_ptr) };
            Ok(Some(string.to_string_lossy().into_owned()))
        }
    }
}

pub(crate) fn destroy(window_ptr: *mut sys::GLFWwindow) {
    if let Err(err) = checked(|| unsafe { sys::glfwDestroyWindow(window_ptr) }) {
        log::warn!("glfwDestroyWindow failed: {}", err);
    }
}

/// A window dropped by an event handler is destroyed when the event pump returns,
/// and until then may still be the subject of events.
impl Drop for Window {
    fn drop(&mut self) {
        if self.window_ptr.is_null() {
            return;
        }
        if callbacks::defer_destroy(self.window_ptr) {
            log::debug!("deferring destruction of {:?} until the event pump returns", self.window_id());
        } else {
            destroy(self.window_ptr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_state_params_cover_every_flag() {
        let all = WindowState::PARAMS
            .iter()
            .fold(WindowState::empty(), |state, (flag, _)| state | *flag);
        assert_eq!(WindowState::all(), all);
    }

    #[test]
    fn window_id_round_trips_pointer() {
        let id = WindowId(0x2000);
        assert_eq!(0x2000 as *mut sys::GLFWwindow, id.window_mut_ptr());
        assert_eq!(0x2000 as *const sys::GLFWwindow, id.window_ptr());
    }

    #[test]
    fn unexpected_values_are_invalid_enums() {
        let err = unexpected_value("GLFW_CURSOR_MODE", 42);
        assert_eq!(Some(ErrorKind::InvalidEnum), err.kind());
        assert!(err.desc.contains("GLFW_CURSOR_MODE"));
    }
}
