use core::{
    ffi::{c_char, c_int, c_uint, c_ushort},
    marker::{PhantomData, PhantomPinned},
};

use super::constants::GLFW_GAMMA_RAMP_SIZE;

/// Client API function pointer type.
pub type GLFWglproc = Option<unsafe extern "C" fn()>;

/// Opaque monitor object.
#[repr(C)]
pub struct GLFWmonitor {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Opaque window object.
#[repr(C)]
pub struct GLFWwindow {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// `(error, description)`; the description is only valid until the callback returns.
pub type GLFWerrorfun = Option<unsafe extern "C" fn(c_int, *const c_char)>;
pub type GLFWwindowposfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
pub type GLFWwindowsizefun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
pub type GLFWwindowclosefun = Option<unsafe extern "C" fn(*mut GLFWwindow)>;
pub type GLFWwindowrefreshfun = Option<unsafe extern "C" fn(*mut GLFWwindow)>;
pub type GLFWwindowfocusfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int)>;
pub type GLFWwindowiconifyfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int)>;
/// `(window, button, action)`
pub type GLFWmousebuttonfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
pub type GLFWcursorposfun = Option<unsafe extern "C" fn(*mut GLFWwindow, f64, f64)>;
pub type GLFWcursorenterfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int)>;
pub type GLFWscrollfun = Option<unsafe extern "C" fn(*mut GLFWwindow, f64, f64)>;
/// `(window, key, action)`
pub type GLFWkeyfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int)>;
/// `(window, codepoint)`
pub type GLFWcharfun = Option<unsafe extern "C" fn(*mut GLFWwindow, c_uint)>;
/// `(monitor, event)` where event is `GLFW_CONNECTED` or `GLFW_DISCONNECTED`.
pub type GLFWmonitorfun = Option<unsafe extern "C" fn(*mut GLFWmonitor, c_int)>;

/// Video mode type.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GLFWvidmode {
    pub width: c_int,
    pub height: c_int,
    pub redBits: c_int,
    pub greenBits: c_int,
    pub blueBits: c_int,
}

/// Gamma ramp.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GLFWgammaramp {
    pub red: [c_ushort; GLFW_GAMMA_RAMP_SIZE],
    pub green: [c_ushort; GLFW_GAMMA_RAMP_SIZE],
    pub blue: [c_ushort; GLFW_GAMMA_RAMP_SIZE],
}

impl Default for GLFWgammaramp {
    fn default() -> Self {
        GLFWgammaramp {
            red: [0; GLFW_GAMMA_RAMP_SIZE],
            green: [0; GLFW_GAMMA_RAMP_SIZE],
            blue: [0; GLFW_GAMMA_RAMP_SIZE],
        }
    }
}
