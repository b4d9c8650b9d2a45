//! Safe bindings to GLFW 3.0.
//!
//! [`Glfw`] owns the initialized library. Windows and monitors keep it alive, and
//! the library is terminated when the last of them is dropped. None of these
//! handles are `Send`: GLFW requires window and event functions to be called from
//! the thread that initialized it. The [`context`] module holds the few functions
//! that may be called from any thread.

use core::ffi::{c_int, CStr};
use glfw30_sys::{self as sys};
use std::{
    ffi::CString,
    marker::PhantomData,
    ptr,
    rc::Rc,
    sync::{atomic::AtomicBool, LazyLock, Mutex, MutexGuard, PoisonError, TryLockError},
};

mod callbacks;
pub mod context;
mod error;
mod hint;
mod input;
mod monitor;
mod window;

pub use context::Context;
pub use error::{CreateWindowError, Error, ErrorKind, InitError, TryInitError};
pub use hint::*;
pub use input::*;
pub use monitor::*;
pub use window::*;

static INIT: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

#[derive(Debug)]
struct Terminate {
    _init_guard: InitGuard,
    _phantom: PhantomData<*mut ()>,
}

type InitGuard = MutexGuard<'static, ()>;

#[derive(Debug)]
pub struct Glfw {
    terminate: Rc<Terminate>,
}

impl Drop for Terminate {
    fn drop(&mut self) {
        if let Err(err) = error::checked(|| unsafe { sys::glfwTerminate() }) {
            log::warn!("glfwTerminate failed: {}", err);
        }
    }
}

// The lock guards no data, so a panic that unwound through a live `Glfw` leaves
// nothing inconsistent behind.
fn lock_init() -> InitGuard {
    INIT.lock().unwrap_or_else(PoisonError::into_inner)
}

fn try_lock_init() -> Result<InitGuard, TryInitError> {
    match INIT.try_lock() {
        Ok(guard) => Ok(guard),
        Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => Err(TryInitError::WouldBlock),
    }
}

/// Views an array owned by GLFW. A null pointer or a non-positive count is empty.
pub(crate) unsafe fn raw_slice<'a, T>(ptr: *const T, count: c_int) -> &'a [T] {
    if ptr.is_null() || count <= 0 {
        &[]
    } else {
        core::slice::from_raw_parts(ptr, count as usize)
    }
}

fn non_null<T>(ptr: *mut T, function: &str) -> Result<*mut T, Error> {
    if ptr.is_null() {
        Err(error::unknown_error(function))
    } else {
        Ok(ptr)
    }
}

/// Keeps the entries GLFW reported as written.
fn truncate_to_written<T>(values: &mut Vec<T>, written: c_int) {
    let len = written.clamp(0, values.len() as c_int);
    values.truncate(len as usize);
}

pub(crate) fn c_string(value: &str) -> Result<CString, Error> {
    CString::new(value).map_err(|err| {
        Error::new(
            ErrorKind::InvalidValue,
            format!("string contains a NUL byte at offset {}", err.nul_position()),
        )
    })
}

pub(crate) fn validate_size(width: i32, height: i32) -> Result<(), Error> {
    if width > 0 && height > 0 {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::InvalidValue,
            format!("Invalid window size {}x{}", width, height),
        ))
    }
}

fn initialize(init_guard: InitGuard) -> Result<Glfw, InitError> {
    unsafe {
        // Installed first so that failures inside glfwInit are reported.
        sys::glfwSetErrorCallback(Some(error::error_callback));
        error::clear_error();
        if sys::GL_TRUE == sys::glfwInit() {
            let glfw = Glfw {
                terminate: Rc::new(Terminate {
                    _init_guard: init_guard,
                    _phantom: PhantomData,
                }),
            };
            callbacks::set_global_callbacks();
            Glfw::get_error().map_err(InitError::Init)?;
            log::debug!("initialized GLFW {}", Glfw::get_version_string());
            Ok(glfw)
        } else {
            Err(InitError::Init(
                error::take_error().unwrap_or_else(|| error::unknown_error("glfwInit")),
            ))
        }
    }
}

impl Glfw {
    /// Takes the error GLFW most recently reported on this thread.
    pub fn get_error() -> Result<(), Error> {
        match error::take_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Initializes GLFW, waiting for any other live `Glfw` to be dropped first.
    #[doc(alias = "glfwInit")]
    pub fn init() -> Result<Glfw, InitError> {
        initialize(lock_init())
    }

    #[doc(alias = "glfwInit")]
    pub fn try_init() -> Result<Glfw, TryInitError> {
        let init_guard = try_lock_init()?;
        Ok(initialize(init_guard)?)
    }

    /// Version of the linked library, which may differ from the header version.
    #[doc(alias = "glfwGetVersion")]
    pub fn get_version() -> (i32, i32, i32) {
        let mut major = 0;
        let mut minor = 0;
        let mut rev = 0;
        unsafe { sys::glfwGetVersion(&mut major, &mut minor, &mut rev) }
        (major, minor, rev)
    }

    /// The compile-time configuration of the linked library.
    #[doc(alias = "glfwGetVersionString")]
    pub fn get_version_string() -> String {
        unsafe {
            let version_ptr = sys::glfwGetVersionString();
            if version_ptr.is_null() {
                String::new()
            } else {
                CStr::from_ptr(version_ptr).to_string_lossy().into_owned()
            }
        }
    }

    #[doc(alias = "glfwSetTime")]
    pub fn set_time(&self, time: f64) -> Result<(), Error> {
        error::checked(|| unsafe { sys::glfwSetTime(time) })
    }

    #[doc(alias = "glfwCreateWindow")]
    #[doc(alias = "glfwWindowHint")]
    #[doc(alias = "glfwDefaultWindowHints")]
    pub fn create_window<'a>(
        &self,
        hints: &'a [WindowHint],
        width: i32,
        height: i32,
        title: &str,
        monitor: Option<&Monitor>,
        share: Option<&Window>,
    ) -> Result<Window, CreateWindowError<'a>> {
        validate_size(width, height).map_err(CreateWindowError::CreateWindow)?;
        let title = c_string(title).map_err(CreateWindowError::CreateWindow)?;
        unsafe {
            error::checked(|| sys::glfwDefaultWindowHints())
                .map_err(CreateWindowError::CreateWindow)?;
            for hint in hints.iter() {
                let (target, value) = hint.to_raw();
                error::checked(|| sys::glfwWindowHint(target, value))
                    .map_err(|err| CreateWindowError::Hint(hint, err))?;
            }
            let monitor_ptr = monitor.map(|m| m.monitor_ptr).unwrap_or(ptr::null_mut());
            let share_ptr = share.map(|w| w.window_ptr).unwrap_or(ptr::null_mut());
            let window_ptr = error::checked(|| {
                sys::glfwCreateWindow(width, height, title.as_ptr(), monitor_ptr, share_ptr)
            })
            .and_then(|window_ptr| non_null(window_ptr, "glfwCreateWindow"))
            .map_err(CreateWindowError::CreateWindow)?;
            callbacks::set_window_callbacks(window_ptr);
            Ok(Window {
                window_ptr,
                context_lent: AtomicBool::new(false),
                _terminate: Rc::clone(&self.terminate),
            })
        }
    }

    /// Currently connected monitors, primary first.
    #[doc(alias = "glfwGetMonitors")]
    pub fn get_monitors(&self) -> Result<Vec<Monitor>, Error> {
        let mut count = 0;
        let monitor_ptrs = error::checked(|| unsafe { sys::glfwGetMonitors(&mut count) })?;
        let monitor_ptrs = unsafe { raw_slice(monitor_ptrs as *const *mut sys::GLFWmonitor, count) };
        Ok(monitor_ptrs
            .iter()
            .map(|&monitor_ptr| Monitor {
                monitor_ptr,
                _terminate: Rc::clone(&self.terminate),
            })
            .collect())
    }

    #[doc(alias = "glfwGetPrimaryMonitor")]
    pub fn get_primary_monitor(&self) -> Result<Option<Monitor>, Error> {
        let monitor_ptr = error::checked(|| unsafe { sys::glfwGetPrimaryMonitor() })?;
        if monitor_ptr.is_null() {
            Ok(None)
        } else {
            Ok(Some(Monitor {
                monitor_ptr,
                _terminate: Rc::clone(&self.terminate),
            }))
        }
    }

    /// Processes pending events, passing each to `event_handler` together with the
    /// timer value at which it was received, and returns immediately.
    ///
    /// Fails with [`ErrorKind::InvalidValue`] when called from an event handler.
    #[doc(alias = "glfwPollEvents")]
    pub fn poll_events<F>(&self, event_handler: &mut F) -> Result<(), Error>
    where
        F: FnMut(f64, Event),
    {
        self.pump("glfwPollEvents", event_handler, || unsafe { sys::glfwPollEvents() })
    }

    /// Like [`Glfw::poll_events`], but sleeps until at least one event is available.
    #[doc(alias = "glfwWaitEvents")]
    pub fn wait_events<F>(&self, event_handler: &mut F) -> Result<(), Error>
    where
        F: FnMut(f64, Event),
    {
        self.pump("glfwWaitEvents", event_handler, || unsafe { sys::glfwWaitEvents() })
    }

    fn pump<F>(
        &self,
        function: &str,
        event_handler: &mut F,
        native: impl FnOnce(),
    ) -> Result<(), Error>
    where
        F: FnMut(f64, Event),
    {
        callbacks::ensure_not_dispatching(function)?;
        let unset_handler_guard = callbacks::set_handler(event_handler);
        let result = error::checked(native);
        drop(unset_handler_guard);
        // Windows dropped by the handler.
        for window_ptr in callbacks::take_deferred() {
            window::destroy(window_ptr);
        }
        callbacks::resume_panic();
        result
    }

    #[doc(alias = "glfwGetJoystickParam")]
    pub fn joystick_present(&self, joystick: Joystick) -> Result<bool, Error> {
        Ok(self.joystick_param(joystick, sys::GLFW_PRESENT)? == sys::GL_TRUE)
    }

    fn joystick_param(&self, joystick: Joystick, param: c_int) -> Result<c_int, Error> {
        error::checked(|| unsafe { sys::glfwGetJoystickParam(joystick as c_int, param) })
    }

    /// Current axis positions, each in `-1.0..=1.0`; empty if the joystick is absent.
    #[doc(alias = "glfwGetJoystickAxes")]
    pub fn joystick_axes(&self, joystick: Joystick) -> Result<Vec<f32>, Error> {
        let count = self.joystick_param(joystick, sys::GLFW_AXES)?.max(0);
        let mut axes = vec![0.0f32; count as usize];
        let written = error::checked(|| unsafe {
            sys::glfwGetJoystickAxes(joystick as c_int, axes.as_mut_ptr(), count)
        })?;
        truncate_to_written(&mut axes, written);
        Ok(axes)
    }

    /// Current button states; empty if the joystick is absent.
    #[doc(alias = "glfwGetJoystickButtons")]
    pub fn joystick_buttons(&self, joystick: Joystick) -> Result<Vec<Action>, Error> {
        let count = self.joystick_param(joystick, sys::GLFW_BUTTONS)?.max(0);
        let mut buttons = vec![0u8; count as usize];
        let written = error::checked(|| unsafe {
            sys::glfwGetJoystickButtons(joystick as c_int, buttons.as_mut_ptr(), count)
        })?;
        truncate_to_written(&mut buttons, written);
        Ok(buttons.into_iter().map(Action::from_button_state).collect())
    }

    #[doc(alias = "glfwGetJoystickName")]
    pub fn joystick_name(&self, joystick: Joystick) -> Result<Option<String>, Error> {
        let name_ptr = error::checked(|| unsafe { sys::glfwGetJoystickName(joystick as c_int) })?;
        if name_ptr.is_null() {
            Ok(None)
        } else {
            Ok(Some(unsafe { CStr::from_ptr(name_ptr) }.to_string_lossy().into_owned()))
        }
    }
}

/// Seconds elapsed since GLFW was initialized, unless the timer was reset with
/// [`Glfw::set_time`]. May be called from any thread.
#[doc(alias = "glfwGetTime")]
pub fn get_time() -> f64 {
    unsafe { sys::glfwGetTime() }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Event {
    Monitor(MonitorEvent),
    Window(WindowId, WindowEvent),
}

#[derive(Clone, PartialEq, Debug)]
pub enum MonitorEvent {
    Connected(MonitorId),
    Disconnected(MonitorId),
}

#[derive(Clone, PartialEq, Debug)]
pub enum WindowEvent {
    Pos(i32, i32),
    Size(i32, i32),
    Close,
    Refresh,
    Focus(bool),
    Iconify(bool),
    MouseButton(MouseButton, Action),
    CursorPos(f64, f64),
    CursorEnter(bool),
    Scroll(f64, f64),
    Key(Key, Action),
    Char(char),
}

#[cfg(test)]
mod tests {
    use crate::*;

    macro_rules! assert_not_impl {
        ($x:ty, $($t:path),+ $(,)*) => {
            const _: fn() -> () = || {
                struct Check<T: ?Sized>(T);
                trait AmbiguousIfImpl<A> { fn some_item() { } }

                impl<T: ?Sized> AmbiguousIfImpl<()> for Check<T> { }
                impl<T: ?Sized $(+ $t)*> AmbiguousIfImpl<u8> for Check<T> { }

                <Check::<$x> as AmbiguousIfImpl<_>>::some_item()
            };
        };
    }

    assert_not_impl!(Glfw, Send, Sync);
    assert_not_impl!(Terminate, Send, Sync);
    assert_not_impl!(Window, Send, Sync);
    assert_not_impl!(Monitor, Send, Sync);
    assert_not_impl!(Context<'static>, Sync);

    #[test]
    fn window_size_must_be_positive() {
        assert!(validate_size(1, 1).is_ok());
        for (width, height) in [(0, 600), (800, 0), (-1, 600)] {
            let err = validate_size(width, height).unwrap_err();
            assert_eq!(Some(ErrorKind::InvalidValue), err.kind());
        }
    }

    #[test]
    fn strings_with_nul_are_rejected() {
        assert_eq!(c"title", c_string("title").unwrap().as_c_str());
        let err = c_string("ti\0tle").unwrap_err();
        assert_eq!(Some(ErrorKind::InvalidValue), err.kind());
        assert!(err.desc.contains("offset 2"));
    }

    #[test]
    fn init_lock_survives_a_panic() {
        let panicked = std::thread::spawn(|| {
            let _guard = lock_init();
            panic!("unwinding with the init lock held");
        })
        .join();
        assert!(panicked.is_err());

        assert!(INIT.is_poisoned());
        drop(lock_init());
    }

    #[test]
    fn raw_arrays() {
        let values = [3, 1, 2];
        assert_eq!(&[3, 1, 2], unsafe { raw_slice(values.as_ptr(), 3) });
        assert!(unsafe { raw_slice(values.as_ptr(), 0) }.is_empty());
        assert!(unsafe { raw_slice(values.as_ptr(), -1) }.is_empty());
        assert!(unsafe { raw_slice(ptr::null::<i32>(), 3) }.is_empty());
    }

    #[test]
    fn null_result_without_error() {
        let mut value = 0u8;
        assert!(non_null(&mut value as *mut u8, "glfwCreateWindow").is_ok());
        let err = non_null(ptr::null_mut::<sys::GLFWwindow>(), "glfwCreateWindow").unwrap_err();
        assert_eq!(-1, err.code);
        assert_eq!(None, err.kind());
        assert!(err.desc.contains("glfwCreateWindow"));
    }

    #[test]
    fn joystick_values_keep_written_entries() {
        let mut axes = vec![0.5f32; 4];
        truncate_to_written(&mut axes, 2);
        assert_eq!(vec![0.5, 0.5], axes);

        let mut buttons = vec![1u8; 3];
        truncate_to_written(&mut buttons, 7);
        assert_eq!(3, buttons.len());
        truncate_to_written(&mut buttons, -1);
        assert!(buttons.is_empty());
    }

    #[cfg(feature = "native")]
    mod native {
        use crate::*;

        const HIDDEN: &[WindowHint] = &[WindowHint::Visible(false)];

        #[test]
        fn init() {
            let _glfw = Glfw::init().expect("glfwInit");
            let (major, minor, _) = Glfw::get_version();
            assert_eq!((3, 0), (major, minor));
            assert!(!Glfw::get_version_string().is_empty());
        }

        #[test]
        fn try_init_while_initialized() {
            let _glfw = Glfw::init().unwrap();
            assert!(matches!(Glfw::try_init(), Err(TryInitError::WouldBlock)));
        }

        #[test]
        fn timer() {
            let glfw = Glfw::init().unwrap();
            glfw.set_time(10.0).unwrap();
            assert!(get_time() >= 10.0);
        }

        #[test]
        fn get_monitors() {
            let glfw = Glfw::init().unwrap();
            let monitors = glfw.get_monitors().unwrap();
            for monitor in monitors.iter() {
                println!("name: {}", monitor.get_name().unwrap());
                let modes = monitor.get_video_modes().unwrap();
                // GLFW only sorts by depth and area; ties come back in any order.
                let keys: Vec<_> = modes.iter().map(|m| (m.bits_per_pixel(), m.area())).collect();
                assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
            }
            if let Some(primary) = glfw.get_primary_monitor().unwrap() {
                assert_eq!(Some(&primary), monitors.first());
            }
            drop(glfw);
            drop(monitors);
        }

        #[test]
        fn create_window() {
            let glfw = Glfw::init().unwrap();
            let window = glfw
                .create_window(HIDDEN, 320, 240, "test", None, None)
                .expect("create_window");
            assert!(!window.is_visible().unwrap());
            assert!(!window.should_close().unwrap());
            window.set_should_close(true).unwrap();
            assert!(window.should_close().unwrap());
            assert_eq!(None, window.get_monitor().unwrap());

            window.make_context_current().unwrap();
            assert_eq!(Some(window.window_id()), context::current().unwrap());
            context::detach_current().unwrap();
            assert_eq!(None, context::current().unwrap());
        }

        #[test]
        fn render_thread() {
            let glfw = Glfw::init().unwrap();
            let window = glfw.create_window(HIDDEN, 320, 240, "test", None, None).unwrap();
            let context = window.context().unwrap();
            assert!(window.make_context_current().is_err());
            std::thread::scope(|scope| {
                scope.spawn(move || {
                    context.make_current().unwrap();
                    context.swap_buffers().unwrap();
                    context::detach_current().unwrap();
                });
            });
            window.make_context_current().unwrap();
            context::detach_current().unwrap();
            glfw.poll_events(&mut |_, _| {}).unwrap();
        }

        #[test]
        fn invalid_window_size() {
            let glfw = Glfw::init().unwrap();
            let result = glfw.create_window(HIDDEN, 0, 240, "test", None, None);
            assert!(matches!(result, Err(CreateWindowError::CreateWindow(_))));
        }
    }
}
