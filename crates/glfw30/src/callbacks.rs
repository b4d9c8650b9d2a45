use core::ffi::{c_int, c_uint};
use std::{
    any::Any,
    cell::{Cell, RefCell},
    marker::PhantomData,
    mem,
    panic::{self, AssertUnwindSafe},
};

use glfw30_sys as sys;

use crate::{
    Action, Error, ErrorKind, Event, Key, MonitorEvent, MonitorId, MouseButton, WindowEvent,
    WindowId,
};

type CallbackPtr = *mut core::ffi::c_void;

type HandlerFn = fn(time: f64, event: Event, callback_ptr: CallbackPtr);

thread_local! {
    static HANDLER: Cell<Option<(HandlerFn, CallbackPtr)>> = const { Cell::new(None) };
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
    static PANIC: RefCell<Option<Box<dyn Any + Send>>> = const { RefCell::new(None) };
    static DEFERRED: RefCell<Vec<*mut sys::GLFWwindow>> = const { RefCell::new(Vec::new()) };
}

pub struct UnsetHandlerGuard<'a, F> {
    _private: PhantomData<&'a mut F>,
}

impl<'a, F> Drop for UnsetHandlerGuard<'a, F> {
    fn drop(&mut self) {
        HANDLER.with(|cell| cell.set(None));
    }
}

/// Installs `callback` as the receiver of every event dispatched on this thread
/// until the returned guard is dropped.
pub fn set_handler<'a, F>(callback: &'a mut F) -> UnsetHandlerGuard<'a, F>
where
    F: FnMut(f64, Event),
{
    fn handler<F>(time: f64, event: Event, callback_ptr: CallbackPtr)
    where
        F: FnMut(f64, Event),
    {
        unsafe {
            let callback: &mut F = &mut *(callback_ptr as *mut F);
            callback(time, event)
        }
    }

    HANDLER.with(|cell| {
        let callback_ptr = callback as *mut F as CallbackPtr;
        cell.set(Some((handler::<F>, callback_ptr)));
    });

    UnsetHandlerGuard {
        _private: PhantomData,
    }
}

/// Delivers an event to the installed handler. A panicking handler is caught here,
/// since unwinding must not cross the native frames, and re-raised by `resume_panic`.
pub fn dispatch(time: f64, event: Event) {
    let Some((handler, callback_ptr)) = HANDLER.with(Cell::get) else {
        log::trace!("no event handler installed, dropping {:?}", event);
        return;
    };
    if PANIC.with(|slot| slot.borrow().is_some()) {
        log::trace!("event handler panicked, dropping {:?}", event);
        return;
    }
    if DISPATCHING.with(|flag| flag.replace(true)) {
        log::trace!("event raised from within the event handler, dropping {:?}", event);
        return;
    }
    let result = panic::catch_unwind(AssertUnwindSafe(|| handler(time, event, callback_ptr)));
    DISPATCHING.with(|flag| flag.set(false));
    if let Err(payload) = result {
        PANIC.with(|slot| *slot.borrow_mut() = Some(payload));
    }
}

/// Re-raises a panic caught by `dispatch` once control is back in Rust frames.
pub fn resume_panic() {
    if let Some(payload) = PANIC.with(|slot| slot.borrow_mut().take()) {
        panic::resume_unwind(payload);
    }
}

/// Fails when called from inside the event handler, where GLFW forbids `function`.
pub fn ensure_not_dispatching(function: &str) -> Result<(), Error> {
    if DISPATCHING.with(Cell::get) {
        Err(Error::new(
            ErrorKind::InvalidValue,
            format!("{} may not be called from an event handler", function),
        ))
    } else {
        Ok(())
    }
}

/// Queues `window_ptr` for destruction once the running pump returns. Returns
/// `false`, queueing nothing, outside the event handler.
pub fn defer_destroy(window_ptr: *mut sys::GLFWwindow) -> bool {
    if !DISPATCHING.with(Cell::get) {
        return false;
    }
    DEFERRED.with(|deferred| deferred.borrow_mut().push(window_ptr));
    true
}

pub fn take_deferred() -> Vec<*mut sys::GLFWwindow> {
    DEFERRED.with(|deferred| mem::take(&mut *deferred.borrow_mut()))
}

fn gl_bool(value: c_int) -> bool {
    value == sys::GL_TRUE
}

fn mouse_button_event(button: c_int, action: c_int) -> Option<WindowEvent> {
    match (MouseButton::try_from(button), Action::try_from(action)) {
        (Ok(button), Ok(action)) => Some(WindowEvent::MouseButton(button, action)),
        _ => {
            log::warn!("unknown mouse button event: button={} action={}", button, action);
            None
        }
    }
}

fn key_event(key: c_int, action: c_int) -> Option<WindowEvent> {
    let key = Key::try_from(key).unwrap_or(Key::Unknown);
    match Action::try_from(action) {
        Ok(action) => Some(WindowEvent::Key(key, action)),
        Err(action) => {
            log::warn!("unknown key action {} for {:?}", action, key);
            None
        }
    }
}

fn char_event(codepoint: c_uint) -> Option<WindowEvent> {
    match char::from_u32(codepoint) {
        Some(ch) => Some(WindowEvent::Char(ch)),
        None => {
            log::warn!("invalid codepoint {:#x}", codepoint);
            None
        }
    }
}

fn monitor_event(monitor: *mut sys::GLFWmonitor, event: c_int) -> Option<MonitorEvent> {
    let monitor_id = MonitorId(monitor as usize);
    match event {
        sys::GLFW_CONNECTED => Some(MonitorEvent::Connected(monitor_id)),
        sys::GLFW_DISCONNECTED => Some(MonitorEvent::Disconnected(monitor_id)),
        _ => {
            log::warn!("unknown monitor event {:#x}", event);
            None
        }
    }
}

unsafe fn window_event(window: *mut sys::GLFWwindow, event: Option<WindowEvent>) {
    if let Some(event) = event {
        dispatch(sys::glfwGetTime(), Event::Window(WindowId(window as usize), event));
    }
}

unsafe extern "C" fn pos_callback(window: *mut sys::GLFWwindow, xpos: c_int, ypos: c_int) {
    window_event(window, Some(WindowEvent::Pos(xpos, ypos)));
}

unsafe extern "C" fn size_callback(window: *mut sys::GLFWwindow, width: c_int, height: c_int) {
    window_event(window, Some(WindowEvent::Size(width, height)));
}

unsafe extern "C" fn close_callback(window: *mut sys::GLFWwindow) {
    window_event(window, Some(WindowEvent::Close));
}

unsafe extern "C" fn refresh_callback(window: *mut sys::GLFWwindow) {
    window_event(window, Some(WindowEvent::Refresh));
}

unsafe extern "C" fn focus_callback(window: *mut sys::GLFWwindow, focused: c_int) {
    window_event(window, Some(WindowEvent::Focus(gl_bool(focused))));
}

unsafe extern "C" fn iconify_callback(window: *mut sys::GLFWwindow, iconified: c_int) {
    window_event(window, Some(WindowEvent::Iconify(gl_bool(iconified))));
}

unsafe extern "C" fn mouse_button_callback(
    window: *mut sys::GLFWwindow,
    button: c_int,
    action: c_int,
) {
    window_event(window, mouse_button_event(button, action));
}

unsafe extern "C" fn cursor_pos_callback(window: *mut sys::GLFWwindow, xpos: f64, ypos: f64) {
    window_event(window, Some(WindowEvent::CursorPos(xpos, ypos)));
}

unsafe extern "C" fn cursor_enter_callback(window: *mut sys::GLFWwindow, entered: c_int) {
    window_event(window, Some(WindowEvent::CursorEnter(gl_bool(entered))));
}

unsafe extern "C" fn scroll_callback(window: *mut sys::GLFWwindow, xoffset: f64, yoffset: f64) {
    window_event(window, Some(WindowEvent::Scroll(xoffset, yoffset)));
}

unsafe extern "C" fn key_callback(window: *mut sys::GLFWwindow, key: c_int, action: c_int) {
    window_event(window, key_event(key, action));
}

unsafe extern "C" fn char_callback(window: *mut sys::GLFWwindow, codepoint: c_uint) {
    window_event(window, char_event(codepoint));
}

unsafe extern "C" fn monitor_callback(monitor: *mut sys::GLFWmonitor, event: c_int) {
    if let Some(event) = monitor_event(monitor, event) {
        dispatch(sys::glfwGetTime(), Event::Monitor(event));
    }
}

pub unsafe fn set_window_callbacks(window_ptr: *mut sys::GLFWwindow) {
    sys::glfwSetWindowPosCallback(window_ptr, Some(pos_callback));
    sys::glfwSetWindowSizeCallback(window_ptr, Some(size_callback));
    sys::glfwSetWindowCloseCallback(window_ptr, Some(close_callback));
    sys::glfwSetWindowRefreshCallback(window_ptr, Some(refresh_callback));
    sys::glfwSetWindowFocusCallback(window_ptr, Some(focus_callback));
    sys::glfwSetWindowIconifyCallback(window_ptr, Some(iconify_callback));
    sys::glfwSetMouseButtonCallback(window_ptr, Some(mouse_button_callback));
    sys::glfwSetCursorPosCallback(window_ptr, Some(cursor_pos_callback));
    sys::glfwSetCursorEnterCallback(window_ptr, Some(cursor_enter_callback));
    sys::glfwSetScrollCallback(window_ptr, Some(scroll_callback));
    sys::glfwSetKeyCallback(window_ptr, Some(key_callback));
    sys::glfwSetCharCallback(window_ptr, Some(char_callback));
}

pub unsafe fn set_global_callbacks() {
    sys::glfwSetMonitorCallback(Some(monitor_callback));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_event(id: usize, event: WindowEvent) -> Event {
        Event::Window(WindowId(id), event)
    }

    #[test]
    fn events_reach_installed_handler() {
        let mut received = Vec::new();
        {
            let mut handler = |time: f64, event: Event| received.push((time, event));
            let _guard = set_handler(&mut handler);
            dispatch(1.5, window_event(1, WindowEvent::Close));
            dispatch(2.0, window_event(1, WindowEvent::Char('λ')));
        }
        assert_eq!(
            vec![
                (1.5, window_event(1, WindowEvent::Close)),
                (2.0, window_event(1, WindowEvent::Char('λ'))),
            ],
            received
        );
    }

    #[test]
    fn events_without_handler_are_dropped() {
        let mut count = 0;
        {
            let mut handler = |_: f64, _: Event| count += 1;
            let _guard = set_handler(&mut handler);
            dispatch(0.0, Event::Monitor(MonitorEvent::Connected(MonitorId(7))));
        }
        dispatch(0.0, Event::Monitor(MonitorEvent::Disconnected(MonitorId(7))));
        assert_eq!(1, count);
    }

    #[test]
    fn handler_panic_is_resumed() {
        let mut calls = 0;
        let mut handler = |_: f64, _: Event| {
            calls += 1;
            panic!("handler failed");
        };
        let guard = set_handler(&mut handler);
        dispatch(0.0, window_event(2, WindowEvent::Refresh));
        dispatch(0.0, window_event(2, WindowEvent::Refresh));
        drop(guard);
        assert_eq!(1, calls);

        let payload = panic::catch_unwind(resume_panic).expect_err("panic resumed");
        assert_eq!(Some(&"handler failed"), payload.downcast_ref::<&str>());
        resume_panic();
    }

    #[test]
    fn nested_dispatch_is_dropped() {
        let mut seen = Vec::new();
        let mut handler = |_: f64, event: Event| {
            if event == window_event(3, WindowEvent::Refresh) {
                dispatch(0.0, window_event(3, WindowEvent::Close));
            }
            seen.push(event);
        };
        {
            let _guard = set_handler(&mut handler);
            dispatch(0.0, window_event(3, WindowEvent::Refresh));
            dispatch(0.0, window_event(3, WindowEvent::Focus(true)));
        }
        assert_eq!(
            vec![
                window_event(3, WindowEvent::Refresh),
                window_event(3, WindowEvent::Focus(true)),
            ],
            seen
        );
    }

    #[test]
    fn pumping_from_the_handler_is_rejected() {
        assert_eq!(Ok(()), ensure_not_dispatching("glfwPollEvents"));
        let mut results = Vec::new();
        {
            let mut handler = |_: f64, _: Event| results.push(ensure_not_dispatching("glfwPollEvents"));
            let _guard = set_handler(&mut handler);
            dispatch(0.0, window_event(4, WindowEvent::Close));
        }
        let err = results.pop().unwrap().unwrap_err();
        assert_eq!(Some(ErrorKind::InvalidValue), err.kind());
        assert!(err.desc.contains("glfwPollEvents"));
        assert_eq!(Ok(()), ensure_not_dispatching("glfwPollEvents"));
    }

    #[test]
    fn destroy_from_the_handler_is_deferred() {
        let window_ptr = 0x5000 as *mut sys::GLFWwindow;
        assert!(!defer_destroy(window_ptr));
        assert!(take_deferred().is_empty());

        let mut queued = false;
        {
            let mut handler = |_: f64, _: Event| queued = defer_destroy(window_ptr);
            let _guard = set_handler(&mut handler);
            dispatch(0.0, window_event(5, WindowEvent::Close));
        }
        assert!(queued);
        assert_eq!(vec![window_ptr], take_deferred());
        assert!(take_deferred().is_empty());
    }

    #[test]
    fn key_events() {
        assert_eq!(
            Some(WindowEvent::Key(Key::Escape, Action::Press)),
            key_event(sys::GLFW_KEY_ESCAPE, sys::GLFW_PRESS)
        );
        assert_eq!(
            Some(WindowEvent::Key(Key::Unknown, Action::Release)),
            key_event(1000, sys::GLFW_RELEASE)
        );
        assert_eq!(None, key_event(sys::GLFW_KEY_A, 7));
    }

    #[test]
    fn mouse_button_events() {
        assert_eq!(
            Some(WindowEvent::MouseButton(MouseButton::Button2, Action::Press)),
            mouse_button_event(sys::GLFW_MOUSE_BUTTON_RIGHT, sys::GLFW_PRESS)
        );
        assert_eq!(None, mouse_button_event(8, sys::GLFW_PRESS));
        assert_eq!(None, mouse_button_event(0, -1));
    }

    #[test]
    fn char_events() {
        assert_eq!(Some(WindowEvent::Char('é')), char_event(0xE9));
        assert_eq!(None, char_event(0xD800));
        assert_eq!(None, char_event(0x110000));
    }

    #[test]
    fn monitor_events() {
        let monitor = 0x6000 as *mut sys::GLFWmonitor;
        assert_eq!(
            Some(MonitorEvent::Connected(MonitorId(0x6000))),
            monitor_event(monitor, sys::GLFW_CONNECTED)
        );
        assert_eq!(
            Some(MonitorEvent::Disconnected(MonitorId(0x6000))),
            monitor_event(monitor, sys::GLFW_DISCONNECTED)
        );
        assert_eq!(None, monitor_event(monitor, 0));
    }

    #[test]
    fn gl_booleans() {
        assert!(gl_bool(sys::GL_TRUE));
        assert!(!gl_bool(sys::GL_FALSE));
    }
}
