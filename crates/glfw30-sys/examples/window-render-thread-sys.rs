use core::{
    ffi::{c_char, c_int, c_void, CStr},
    mem, ptr, slice,
};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use glfw30_sys as sys;
use parking_lot::{Mutex, ReentrantMutex};

const GL_COLOR_BUFFER_BIT: u32 = 0x4000;

struct Gl {
    clear: Option<extern "system" fn(u32)>,
    clear_color: Option<extern "system" fn(f32, f32, f32, f32)>,
    viewport: Option<extern "system" fn(i32, i32, i32, i32)>,
}

impl Gl {
    /// Requires a current context.
    unsafe fn load() -> Gl {
        let load = |name: &CStr| sys::glfwGetProcAddress(name.as_ptr());
        Gl {
            clear: mem::transmute(load(c"glClear")),
            clear_color: mem::transmute(load(c"glClearColor")),
            viewport: mem::transmute(load(c"glViewport")),
        }
    }
}

/// Shared between the event thread and the render thread through the user pointer.
struct Shared {
    // Held by the event thread while the window is resized. Refresh callbacks fired
    // from inside glfwSetWindowSize lock it again on the same thread.
    frame: ReentrantMutex<()>,
    size: Mutex<(i32, i32)>,
    enlarged: AtomicBool,
}

unsafe fn shared<'a>(window: *mut sys::GLFWwindow) -> &'a Shared {
    &*(sys::glfwGetWindowUserPointer(window) as *const Shared)
}

unsafe extern "C" fn error_callback(code: c_int, desc: *const c_char) {
    if !desc.is_null() {
        eprintln!("GLFW error {:#x}: {:?}", code, CStr::from_ptr(desc));
    }
}

unsafe extern "C" fn size_callback(window: *mut sys::GLFWwindow, width: c_int, height: c_int) {
    *shared(window).size.lock() = (width, height);
}

unsafe extern "C" fn refresh_callback(window: *mut sys::GLFWwindow) {
    // Wait for the render thread to finish its frame.
    let _frame = shared(window).frame.lock();
}

unsafe extern "C" fn key_callback(window: *mut sys::GLFWwindow, key: c_int, action: c_int) {
    if action != sys::GLFW_PRESS {
        return;
    }
    match key {
        sys::GLFW_KEY_ESCAPE => sys::glfwSetWindowShouldClose(window, sys::GL_TRUE),
        sys::GLFW_KEY_F => {
            let shared = shared(window);
            let _frame = shared.frame.lock();
            if shared.enlarged.fetch_not(Ordering::SeqCst) {
                sys::glfwSetWindowPos(window, 100, 100);
                sys::glfwSetWindowSize(window, 800, 600);
            } else if let Some(mode) = best_video_mode(sys::glfwGetPrimaryMonitor()) {
                sys::glfwSetWindowPos(window, 0, 0);
                sys::glfwSetWindowSize(window, mode.width, mode.height);
            }
        }
        _ => {}
    }
}

/// The deepest color mode, largest first among equals.
unsafe fn best_video_mode(monitor: *mut sys::GLFWmonitor) -> Option<sys::GLFWvidmode> {
    if monitor.is_null() {
        return None;
    }
    let mut count = 0;
    let modes = sys::glfwGetVideoModes(monitor, &mut count);
    if modes.is_null() {
        return None;
    }
    slice::from_raw_parts(modes, count as usize)
        .iter()
        .copied()
        .max_by_key(|mode| {
            let bits = mode.redBits + mode.greenBits + mode.blueBits;
            (bits, mode.width * mode.height)
        })
}

struct SendWindow(*mut sys::GLFWwindow);

unsafe impl Send for SendWindow {}

unsafe fn render(window: *mut sys::GLFWwindow) {
    sys::glfwMakeContextCurrent(window);
    sys::glfwSwapInterval(1);
    let gl = Gl::load();
    let shared = shared(window);

    while sys::glfwWindowShouldClose(window) == sys::GL_FALSE {
        let _frame = shared.frame.lock();
        let (width, height) = *shared.size.lock();
        gl.viewport.expect("glViewport")(0, 0, width, height);

        let phase = sys::glfwGetTime() as f32;
        gl.clear_color.expect("glClearColor")(phase.sin().abs(), 0.2, phase.cos().abs(), 1.0);
        gl.clear.expect("glClear")(GL_COLOR_BUFFER_BIT);
        sys::glfwSwapBuffers(window);
    }

    sys::glfwMakeContextCurrent(ptr::null_mut());
}

fn main() {
    unsafe {
        sys::glfwSetErrorCallback(Some(error_callback));
        assert_eq!(sys::GL_TRUE, sys::glfwInit(), "glfwInit");

        let window = sys::glfwCreateWindow(
            800,
            600,
            c"F enlarges, Escape quits".as_ptr(),
            ptr::null_mut(),
            ptr::null_mut(),
        );
        assert!(!window.is_null(), "glfwCreateWindow");

        let shared = Shared {
            frame: ReentrantMutex::new(()),
            size: Mutex::new((800, 600)),
            enlarged: AtomicBool::new(false),
        };
        sys::glfwSetWindowUserPointer(window, &shared as *const Shared as *mut c_void);
        sys::glfwSetWindowSizeCallback(window, Some(size_callback));
        sys::glfwSetWindowRefreshCallback(window, Some(refresh_callback));
        sys::glfwSetKeyCallback(window, Some(key_callback));

        thread::scope(|scope| {
            let render_window = SendWindow(window);
            scope.spawn(move || {
                let render_window = render_window;
                render(render_window.0)
            });

            while sys::glfwWindowShouldClose(window) == sys::GL_FALSE {
                sys::glfwWaitEvents();
            }
        });

        sys::glfwDestroyWindow(window);
        sys::glfwTerminate();
    }
}
