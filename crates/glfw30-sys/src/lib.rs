//! Raw bindings to the GLFW 3.0 C API.
//!
//! Every item mirrors the C header one to one. Callback typedefs are wrapped in
//! `Option` so that passing `None` is the same as passing `NULL`.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(rustdoc::broken_intra_doc_links)]

mod ffi;
pub use ffi::*;

#[cfg(test)]
mod tests {
    use core::{ffi::c_int, mem};

    use crate as sys;

    #[test]
    fn vidmode_layout() {
        assert_eq!(5 * mem::size_of::<c_int>(), mem::size_of::<sys::GLFWvidmode>());
        assert_eq!(mem::align_of::<c_int>(), mem::align_of::<sys::GLFWvidmode>());
    }

    #[test]
    fn gamma_ramp_holds_256_entries_per_channel() {
        let ramp = sys::GLFWgammaramp::default();
        assert_eq!(256, sys::GLFW_GAMMA_RAMP_SIZE);
        assert_eq!(sys::GLFW_GAMMA_RAMP_SIZE, ramp.red.len());
        assert_eq!(sys::GLFW_GAMMA_RAMP_SIZE, ramp.green.len());
        assert_eq!(sys::GLFW_GAMMA_RAMP_SIZE, ramp.blue.len());
        assert_eq!(1536, mem::size_of::<sys::GLFWgammaramp>());
    }

    #[test]
    fn callbacks_are_nullable_pointers() {
        let pointer = mem::size_of::<*const ()>();
        assert_eq!(pointer, mem::size_of::<sys::GLFWerrorfun>());
        assert_eq!(pointer, mem::size_of::<sys::GLFWkeyfun>());
        assert_eq!(pointer, mem::size_of::<sys::GLFWmonitorfun>());
        assert_eq!(pointer, mem::size_of::<sys::GLFWglproc>());
    }

    #[test]
    fn opaque_handles_are_zero_sized() {
        assert_eq!(0, mem::size_of::<sys::GLFWwindow>());
        assert_eq!(0, mem::size_of::<sys::GLFWmonitor>());
    }

    #[test]
    fn error_codes_are_contiguous() {
        let codes = [
            sys::GLFW_NOT_INITIALIZED,
            sys::GLFW_NO_CURRENT_CONTEXT,
            sys::GLFW_INVALID_ENUM,
            sys::GLFW_INVALID_VALUE,
            sys::GLFW_OUT_OF_MEMORY,
            sys::GLFW_API_UNAVAILABLE,
            sys::GLFW_VERSION_UNAVAILABLE,
            sys::GLFW_PLATFORM_ERROR,
            sys::GLFW_FORMAT_UNAVAILABLE,
        ];
        for pair in codes.windows(2) {
            assert_eq!(pair[0] + 1, pair[1]);
        }
    }

    #[test]
    fn key_table_bounds() {
        assert_eq!(-1, sys::GLFW_KEY_UNKNOWN);
        assert_eq!(sys::GLFW_KEY_MENU, sys::GLFW_KEY_LAST);
        assert_eq!(sys::GLFW_KEY_A + 25, sys::GLFW_KEY_Z);
        assert_eq!(sys::GLFW_KEY_F1 + 24, sys::GLFW_KEY_F25);
        assert_eq!(7, sys::GLFW_MOUSE_BUTTON_LAST);
        assert_eq!(15, sys::GLFW_JOYSTICK_LAST);
    }

    #[cfg(feature = "native")]
    #[test]
    fn glfw_init_terminate() {
        unsafe {
            let status = sys::glfwInit();
            assert_eq!(sys::GL_TRUE, status);
            let (mut major, mut minor, mut rev) = (0, 0, 0);
            sys::glfwGetVersion(&mut major, &mut minor, &mut rev);
            assert_eq!(sys::GLFW_VERSION_MAJOR, major);
            sys::glfwTerminate();
        }
    }
}
