use core::ffi::{c_char, c_float, c_int, c_uchar, c_void};

use super::types::*;

extern "C" {
    pub fn glfwInit() -> c_int;
    pub fn glfwTerminate();
    pub fn glfwGetVersion(major: *mut c_int, minor: *mut c_int, rev: *mut c_int);
    pub fn glfwGetVersionString() -> *const c_char;
    pub fn glfwSetErrorCallback(cbfun: GLFWerrorfun) -> GLFWerrorfun;

    pub fn glfwGetMonitors(count: *mut c_int) -> *mut *mut GLFWmonitor;
    pub fn glfwGetPrimaryMonitor() -> *mut GLFWmonitor;
    pub fn glfwGetMonitorPos(monitor: *mut GLFWmonitor, xpos: *mut c_int, ypos: *mut c_int);
    pub fn glfwGetMonitorPhysicalSize(
        monitor: *mut GLFWmonitor,
        width: *mut c_int,
        height: *mut c_int,
    );
    pub fn glfwGetMonitorName(monitor: *mut GLFWmonitor) -> *const c_char;
    pub fn glfwSetMonitorCallback(cbfun: GLFWmonitorfun) -> GLFWmonitorfun;
    pub fn glfwGetVideoModes(monitor: *mut GLFWmonitor, count: *mut c_int) -> *const GLFWvidmode;
    /// Returns a struct cleared to all zeroes if an error occurred.
    pub fn glfwGetVideoMode(monitor: *mut GLFWmonitor) -> GLFWvidmode;

    pub fn glfwSetGamma(monitor: *mut GLFWmonitor, gamma: c_float);
    pub fn glfwGetGammaRamp(monitor: *mut GLFWmonitor, ramp: *mut GLFWgammaramp);
    pub fn glfwSetGammaRamp(monitor: *mut GLFWmonitor, ramp: *const GLFWgammaramp);

    pub fn glfwDefaultWindowHints();
    pub fn glfwWindowHint(target: c_int, hint: c_int);
    pub fn glfwCreateWindow(
        width: c_int,
        height: c_int,
        title: *const c_char,
        monitor: *mut GLFWmonitor,
        share: *mut GLFWwindow,
    ) -> *mut GLFWwindow;
    pub fn glfwDestroyWindow(window: *mut GLFWwindow);
    pub fn glfwWindowShouldClose(window: *mut GLFWwindow) -> c_int;
    pub fn glfwSetWindowShouldClose(window: *mut GLFWwindow, value: c_int);
    pub fn glfwSetWindowTitle(window: *mut GLFWwindow, title: *const c_char);
    pub fn glfwGetWindowPos(window: *mut GLFWwindow, xpos: *mut c_int, ypos: *mut c_int);
    pub fn glfwSetWindowPos(window: *mut GLFWwindow, xpos: c_int, ypos: c_int);
    pub fn glfwGetWindowSize(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int);
    pub fn glfwSetWindowSize(window: *mut GLFWwindow, width: c_int, height: c_int);
    pub fn glfwIconifyWindow(window: *mut GLFWwindow);
    pub fn glfwRestoreWindow(window: *mut GLFWwindow);
    pub fn glfwShowWindow(window: *mut GLFWwindow);
    pub fn glfwHideWindow(window: *mut GLFWwindow);
    pub fn glfwGetWindowMonitor(window: *mut GLFWwindow) -> *mut GLFWmonitor;
    pub fn glfwGetWindowParam(window: *mut GLFWwindow, param: c_int) -> c_int;
    pub fn glfwSetWindowUserPointer(window: *mut GLFWwindow, pointer: *mut c_void);
    pub fn glfwGetWindowUserPointer(window: *mut GLFWwindow) -> *mut c_void;
    pub fn glfwSetWindowPosCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWwindowposfun,
    ) -> GLFWwindowposfun;
    pub fn glfwSetWindowSizeCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWwindowsizefun,
    ) -> GLFWwindowsizefun;
    pub fn glfwSetWindowCloseCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWwindowclosefun,
    ) -> GLFWwindowclosefun;
    pub fn glfwSetWindowRefreshCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWwindowrefreshfun,
    ) -> GLFWwindowrefreshfun;
    pub fn glfwSetWindowFocusCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWwindowfocusfun,
    ) -> GLFWwindowfocusfun;
    pub fn glfwSetWindowIconifyCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWwindowiconifyfun,
    ) -> GLFWwindowiconifyfun;

    pub fn glfwPollEvents();
    pub fn glfwWaitEvents();

    pub fn glfwGetInputMode(window: *mut GLFWwindow, mode: c_int) -> c_int;
    pub fn glfwSetInputMode(window: *mut GLFWwindow, mode: c_int, value: c_int);
    pub fn glfwGetKey(window: *mut GLFWwindow, key: c_int) -> c_int;
    pub fn glfwGetMouseButton(window: *mut GLFWwindow, button: c_int) -> c_int;
    pub fn glfwGetCursorPos(window: *mut GLFWwindow, xpos: *mut f64, ypos: *mut f64);
    pub fn glfwSetCursorPos(window: *mut GLFWwindow, xpos: f64, ypos: f64);
    pub fn glfwSetKeyCallback(window: *mut GLFWwindow, cbfun: GLFWkeyfun) -> GLFWkeyfun;
    pub fn glfwSetCharCallback(window: *mut GLFWwindow, cbfun: GLFWcharfun) -> GLFWcharfun;
    pub fn glfwSetMouseButtonCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWmousebuttonfun,
    ) -> GLFWmousebuttonfun;
    pub fn glfwSetCursorPosCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWcursorposfun,
    ) -> GLFWcursorposfun;
    pub fn glfwSetCursorEnterCallback(
        window: *mut GLFWwindow,
        cbfun: GLFWcursorenterfun,
    ) -> GLFWcursorenterfun;
    pub fn glfwSetScrollCallback(window: *mut GLFWwindow, cbfun: GLFWscrollfun) -> GLFWscrollfun;

    pub fn glfwGetJoystickParam(joy: c_int, param: c_int) -> c_int;
    pub fn glfwGetJoystickAxes(joy: c_int, axes: *mut c_float, numaxes: c_int) -> c_int;
    pub fn glfwGetJoystickButtons(joy: c_int, buttons: *mut c_uchar, numbuttons: c_int) -> c_int;
    pub fn glfwGetJoystickName(joy: c_int) -> *const c_char;

    pub fn glfwSetClipboardString(window: *mut GLFWwindow, string: *const c_char);
    pub fn glfwGetClipboardString(window: *mut GLFWwindow) -> *const c_char;

    pub fn glfwGetTime() -> f64;
    pub fn glfwSetTime(time: f64);

    pub fn glfwMakeContextCurrent(window: *mut GLFWwindow);
    pub fn glfwGetCurrentContext() -> *mut GLFWwindow;
    pub fn glfwSwapBuffers(window: *mut GLFWwindow);
    pub fn glfwSwapInterval(interval: c_int);
    pub fn glfwExtensionSupported(extension: *const c_char) -> c_int;
    pub fn glfwGetProcAddress(procname: *const c_char) -> GLFWglproc;
}
