use core::ffi::c_int;

use glfw30_sys as sys;

/// Hints applied before a window is created. Anything not listed keeps its
/// default value, since hints are reset before every creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHint {
    Resizable(bool),
    Visible(bool),
    Decorated(bool),
    RedBits(i32),
    GreenBits(i32),
    BlueBits(i32),
    AlphaBits(i32),
    DepthBits(i32),
    StencilBits(i32),
    AccumRedBits(i32),
    AccumGreenBits(i32),
    AccumBlueBits(i32),
    AccumAlphaBits(i32),
    AuxBuffers(i32),
    Samples(i32),
    RefreshRate(i32),
    Stereo(bool),
    SrgbCapable(bool),
    ClientApi(ClientApi),
    ContextVersionMajor(i32),
    ContextVersionMinor(i32),
    ContextRobustness(ContextRobustness),
    OpenGlForwardCompat(bool),
    OpenGlDebugContext(bool),
    OpenGlProfile(OpenGlProfile),
}

fn gl_bool(value: bool) -> c_int {
    if value {
        sys::GL_TRUE
    } else {
        sys::GL_FALSE
    }
}

impl WindowHint {
    pub fn none() -> &'static [WindowHint] {
        &[]
    }

    /// The `(target, hint)` pair passed to `glfwWindowHint`.
    pub fn to_raw(&self) -> (c_int, c_int) {
        match *self {
            WindowHint::Resizable(value) => (sys::GLFW_RESIZABLE, gl_bool(value)),
            WindowHint::Visible(value) => (sys::GLFW_VISIBLE, gl_bool(value)),
            WindowHint::Decorated(value) => (sys::GLFW_DECORATED, gl_bool(value)),
            WindowHint::RedBits(bits) => (sys::GLFW_RED_BITS, bits),
            WindowHint::GreenBits(bits) => (sys::GLFW_GREEN_BITS, bits),
            WindowHint::BlueBits(bits) => (sys::GLFW_BLUE_BITS, bits),
            WindowHint::AlphaBits(bits) => (sys::GLFW_ALPHA_BITS, bits),
            WindowHint::DepthBits(bits) => (sys::GLFW_DEPTH_BITS, bits),
            WindowHint::StencilBits(bits) => (sys::GLFW_STENCIL_BITS, bits),
            WindowHint::AccumRedBits(bits) => (sys::GLFW_ACCUM_RED_BITS, bits),
            WindowHint::AccumGreenBits(bits) => (sys::GLFW_ACCUM_GREEN_BITS, bits),
            WindowHint::AccumBlueBits(bits) => (sys::GLFW_ACCUM_BLUE_BITS, bits),
            WindowHint::AccumAlphaBits(bits) => (sys::GLFW_ACCUM_ALPHA_BITS, bits),
            WindowHint::AuxBuffers(count) => (sys::GLFW_AUX_BUFFERS, count),
            WindowHint::Samples(count) => (sys::GLFW_SAMPLES, count),
            WindowHint::RefreshRate(rate) => (sys::GLFW_REFRESH_RATE, rate),
            WindowHint::Stereo(value) => (sys::GLFW_STEREO, gl_bool(value)),
            WindowHint::SrgbCapable(value) => (sys::GLFW_SRGB_CAPABLE, gl_bool(value)),
            WindowHint::ClientApi(api) => (sys::GLFW_CLIENT_API, api as c_int),
            WindowHint::ContextVersionMajor(major) => (sys::GLFW_CONTEXT_VERSION_MAJOR, major),
            WindowHint::ContextVersionMinor(minor) => (sys::GLFW_CONTEXT_VERSION_MINOR, minor),
            WindowHint::ContextRobustness(robustness) => {
                (sys::GLFW_CONTEXT_ROBUSTNESS, robustness as c_int)
            }
            WindowHint::OpenGlForwardCompat(value) => {
                (sys::GLFW_OPENGL_FORWARD_COMPAT, gl_bool(value))
            }
            WindowHint::OpenGlDebugContext(value) => {
                (sys::GLFW_OPENGL_DEBUG_CONTEXT, gl_bool(value))
            }
            WindowHint::OpenGlProfile(profile) => (sys::GLFW_OPENGL_PROFILE, profile as c_int),
        }
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientApi {
    OpenGl = sys::GLFW_OPENGL_API,
    OpenGlEs = sys::GLFW_OPENGL_ES_API,
}

impl TryFrom<i32> for ClientApi {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            sys::GLFW_OPENGL_API => Ok(ClientApi::OpenGl),
            sys::GLFW_OPENGL_ES_API => Ok(ClientApi::OpenGlEs),
            _ => Err(value),
        }
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRobustness {
    None = sys::GLFW_NO_ROBUSTNESS,
    NoResetNotification = sys::GLFW_NO_RESET_NOTIFICATION,
    LoseContextOnReset = sys::GLFW_LOSE_CONTEXT_ON_RESET,
}

impl TryFrom<i32> for ContextRobustness {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            sys::GLFW_NO_ROBUSTNESS => Ok(ContextRobustness::None),
            sys::GLFW_NO_RESET_NOTIFICATION => Ok(ContextRobustness::NoResetNotification),
            sys::GLFW_LOSE_CONTEXT_ON_RESET => Ok(ContextRobustness::LoseContextOnReset),
            _ => Err(value),
        }
    }
}

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenGlProfile {
    /// Unknown profile, or a context for another client API.
    Any = sys::GLFW_OPENGL_NO_PROFILE,
    Core = sys::GLFW_OPENGL_CORE_PROFILE,
    Compat = sys::GLFW_OPENGL_COMPAT_PROFILE,
}

impl TryFrom<i32> for OpenGlProfile {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            sys::GLFW_OPENGL_NO_PROFILE => Ok(OpenGlProfile::Any),
            sys::GLFW_OPENGL_CORE_PROFILE => Ok(OpenGlProfile::Core),
            sys::GLFW_OPENGL_COMPAT_PROFILE => Ok(OpenGlProfile::Compat),
            _ => Err(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_hints_use_gl_true_and_false() {
        assert_eq!((sys::GLFW_VISIBLE, sys::GL_FALSE), WindowHint::Visible(false).to_raw());
        assert_eq!((sys::GLFW_RESIZABLE, sys::GL_TRUE), WindowHint::Resizable(true).to_raw());
        assert_eq!(
            (sys::GLFW_OPENGL_DEBUG_CONTEXT, sys::GL_TRUE),
            WindowHint::OpenGlDebugContext(true).to_raw()
        );
    }

    #[test]
    fn context_hints() {
        assert_eq!(
            (sys::GLFW_CLIENT_API, sys::GLFW_OPENGL_ES_API),
            WindowHint::ClientApi(ClientApi::OpenGlEs).to_raw()
        );
        assert_eq!(
            (sys::GLFW_OPENGL_PROFILE, sys::GLFW_OPENGL_CORE_PROFILE),
            WindowHint::OpenGlProfile(OpenGlProfile::Core).to_raw()
        );
        assert_eq!(
            (sys::GLFW_CONTEXT_ROBUSTNESS, 0),
            WindowHint::ContextRobustness(ContextRobustness::None).to_raw()
        );
        assert_eq!((sys::GLFW_CONTEXT_VERSION_MAJOR, 3), WindowHint::ContextVersionMajor(3).to_raw());
    }

    #[test]
    fn framebuffer_hints_pass_values_through() {
        assert_eq!((sys::GLFW_DEPTH_BITS, 24), WindowHint::DepthBits(24).to_raw());
        assert_eq!((sys::GLFW_SAMPLES, 4), WindowHint::Samples(4).to_raw());
        assert_eq!((sys::GLFW_REFRESH_RATE, 60), WindowHint::RefreshRate(60).to_raw());
    }

    #[test]
    fn values_from_params() {
        assert_eq!(Ok(ClientApi::OpenGl), ClientApi::try_from(sys::GLFW_OPENGL_API));
        assert_eq!(Err(0), ClientApi::try_from(0));
        assert_eq!(Ok(OpenGlProfile::Any), OpenGlProfile::try_from(0));
        assert_eq!(
            Ok(ContextRobustness::LoseContextOnReset),
            ContextRobustness::try_from(sys::GLFW_LOSE_CONTEXT_ON_RESET)
        );
    }
}
