use core::{
    ffi::{c_char, c_int, c_void, CStr},
    mem, ptr, slice,
};
use std::ffi::CString;

use glfw30_sys as sys;

const GL_COLOR_BUFFER_BIT: u32 = 0x4000;

struct State {
    clear: Option<extern "system" fn(u32)>,
    clear_color: Option<extern "system" fn(f32, f32, f32, f32)>,
    cursor: (f64, f64),
    inside: bool,
}

unsafe fn state<'a>(window: *mut sys::GLFWwindow) -> &'a mut State {
    &mut *(sys::glfwGetWindowUserPointer(window) as *mut State)
}

unsafe extern "C" fn error_callback(code: c_int, desc: *const c_char) {
    let desc = if desc.is_null() {
        "".into()
    } else {
        CStr::from_ptr(desc).to_string_lossy()
    };
    eprintln!("GLFW error {:#x}: {}", code, desc);
}

unsafe extern "C" fn key_callback(window: *mut sys::GLFWwindow, key: c_int, action: c_int) {
    if action != sys::GLFW_PRESS {
        return;
    }
    match key {
        sys::GLFW_KEY_ESCAPE => sys::glfwSetWindowShouldClose(window, sys::GL_TRUE),
        sys::GLFW_KEY_C => {
            let mode = sys::glfwGetInputMode(window, sys::GLFW_CURSOR_MODE);
            let next = if mode == sys::GLFW_CURSOR_NORMAL {
                sys::GLFW_CURSOR_HIDDEN
            } else {
                sys::GLFW_CURSOR_NORMAL
            };
            sys::glfwSetInputMode(window, sys::GLFW_CURSOR_MODE, next);
        }
        _ => {}
    }
}

unsafe extern "C" fn cursor_pos_callback(window: *mut sys::GLFWwindow, xpos: f64, ypos: f64) {
    state(window).cursor = (xpos, ypos);
}

unsafe extern "C" fn cursor_enter_callback(window: *mut sys::GLFWwindow, entered: c_int) {
    state(window).inside = entered == sys::GL_TRUE;
}

unsafe extern "C" fn refresh_callback(window: *mut sys::GLFWwindow) {
    draw(window);
}

unsafe fn draw(window: *mut sys::GLFWwindow) {
    let state = state(window);
    let (mut width, mut height) = (0, 0);
    sys::glfwGetWindowSize(window, &mut width, &mut height);

    let (red, green) = if state.inside && width > 0 && height > 0 {
        (
            (state.cursor.0 / width as f64) as f32,
            (state.cursor.1 / height as f64) as f32,
        )
    } else {
        (0.1, 0.1)
    };
    state.clear_color.expect("glClearColor")(red, green, 0.3, 1.0);
    state.clear.expect("glClear")(GL_COLOR_BUFFER_BIT);
    sys::glfwSwapBuffers(window);
}

unsafe fn print_monitors() {
    let mut count = 0;
    let monitors = sys::glfwGetMonitors(&mut count);
    if monitors.is_null() {
        return;
    }
    for &monitor in slice::from_raw_parts(monitors, count as usize) {
        let name = CStr::from_ptr(sys::glfwGetMonitorName(monitor));
        let (mut width_mm, mut height_mm) = (0, 0);
        sys::glfwGetMonitorPhysicalSize(monitor, &mut width_mm, &mut height_mm);
        let mode = sys::glfwGetVideoMode(monitor);
        println!(
            "{:?}: {}x{} ({}mm x {}mm), {} modes",
            name,
            mode.width,
            mode.height,
            width_mm,
            height_mm,
            {
                let mut modes = 0;
                sys::glfwGetVideoModes(monitor, &mut modes);
                modes
            }
        );
    }
}

fn main() {
    unsafe {
        sys::glfwSetErrorCallback(Some(error_callback));
        assert_eq!(sys::GL_TRUE, sys::glfwInit(), "glfwInit");
        println!("GLFW {:?}", CStr::from_ptr(sys::glfwGetVersionString()));

        print_monitors();

        sys::glfwDefaultWindowHints();
        sys::glfwWindowHint(sys::GLFW_RESIZABLE, sys::GL_TRUE);
        let window = sys::glfwCreateWindow(
            640,
            480,
            c"move the cursor, C toggles it, Escape quits".as_ptr(),
            ptr::null_mut(),
            ptr::null_mut(),
        );
        assert!(!window.is_null(), "glfwCreateWindow");

        sys::glfwMakeContextCurrent(window);
        sys::glfwSwapInterval(1);

        let mut state = State {
            clear: mem::transmute(sys::glfwGetProcAddress(c"glClear".as_ptr())),
            clear_color: mem::transmute(sys::glfwGetProcAddress(c"glClearColor".as_ptr())),
            cursor: (0.0, 0.0),
            inside: false,
        };
        sys::glfwSetWindowUserPointer(window, &mut state as *mut State as *mut c_void);
        sys::glfwSetKeyCallback(window, Some(key_callback));
        sys::glfwSetCursorPosCallback(window, Some(cursor_pos_callback));
        sys::glfwSetCursorEnterCallback(window, Some(cursor_enter_callback));
        sys::glfwSetWindowRefreshCallback(window, Some(refresh_callback));

        let mut frames = 0u32;
        let mut last = sys::glfwGetTime();
        while sys::glfwWindowShouldClose(window) == sys::GL_FALSE {
            sys::glfwPollEvents();
            draw(window);

            frames += 1;
            let now = sys::glfwGetTime();
            if now - last >= 1.0 {
                let title = CString::new(format!("{} fps", frames)).unwrap_or_default();
                sys::glfwSetWindowTitle(window, title.as_ptr());
                frames = 0;
                last = now;
            }
        }

        sys::glfwMakeContextCurrent(ptr::null_mut());
        sys::glfwDestroyWindow(window);
        sys::glfwTerminate();
    }
}
